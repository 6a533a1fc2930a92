mod common;

mod tests {
    use std::net::Ipv4Addr;

    use drone_r6_core::network::{StationConfig, SupervisorError, WIFI_TRY_ATTEMPTS, static_ip};
    use drone_r6_core::{
        Animation, AnimationSelector, ConnectionStage, ConnectivitySupervisor, GatewayInfo,
        NetworkState, NetworkStatus, RadioDriver, RadioEvent, SupervisorConfig, WifiCredentials,
    };

    use crate::common::{MockRadio, RadioCall, RadioFault};

    const GATEWAY: Ipv4Addr = Ipv4Addr::new(172, 20, 10, 1);
    const NETMASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 240);

    fn supervisor<'a>(
        state: &'a NetworkState,
        selector: &'a AnimationSelector,
    ) -> ConnectivitySupervisor<'a, MockRadio> {
        ConnectivitySupervisor::new(
            MockRadio::default(),
            state,
            selector,
            WifiCredentials::new("drone-net", "secret").unwrap(),
            SupervisorConfig::default(),
        )
    }

    #[test]
    fn test_static_ip_uses_gateway_network() {
        assert_eq!(static_ip(GATEWAY, NETMASK, 2), Ipv4Addr::new(172, 20, 10, 2));
        assert_eq!(
            static_ip(
                Ipv4Addr::new(192, 168, 4, 1),
                Ipv4Addr::new(255, 255, 255, 0),
                2
            ),
            Ipv4Addr::new(192, 168, 4, 2)
        );
    }

    #[test]
    fn test_gateway_info_empty_until_both_known() {
        assert!(GatewayInfo::default().is_empty());
        let partial = GatewayInfo {
            gateway: Some(GATEWAY),
            netmask: None,
        };
        assert!(partial.is_empty());
        assert!(!GatewayInfo::new(GATEWAY, NETMASK).is_empty());
    }

    #[test]
    fn test_events_update_state() {
        let state = NetworkState::new();
        state.set_status(NetworkStatus::TryingToConnect);

        // Ignored while a retry is running
        state.handle_event(RadioEvent::Disconnected);
        assert_eq!(state.status(), NetworkStatus::TryingToConnect);

        state.handle_event(RadioEvent::Connected);
        assert_eq!(state.status(), NetworkStatus::Connected);
        state.handle_event(RadioEvent::Disconnected);
        assert_eq!(state.status(), NetworkStatus::Disconnected);

        state.handle_event(RadioEvent::GotIp {
            gateway: GATEWAY,
            netmask: NETMASK,
        });
        assert_eq!(state.gateway(), GatewayInfo::new(GATEWAY, NETMASK));
    }

    #[test]
    fn test_transition_only_from_expected_status() {
        let state = NetworkState::new();
        state.set_status(NetworkStatus::Connected);
        assert!(!state.transition(NetworkStatus::TryingToConnect, NetworkStatus::Disconnected));
        assert_eq!(state.status(), NetworkStatus::Connected);
        assert!(state.transition(NetworkStatus::Connected, NetworkStatus::Disconnected));
        assert_eq!(state.status(), NetworkStatus::Disconnected);
    }

    #[test]
    fn test_attempts_exhausted_after_limit_plus_one_polls() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        assert_eq!(state.status(), NetworkStatus::Disconnected);
        assert_eq!(supervisor.attempts(), 0);

        supervisor.start();
        for poll in 1..=WIFI_TRY_ATTEMPTS {
            supervisor.poll().unwrap();
            assert_eq!(state.status(), NetworkStatus::TryingToConnect);
            assert_eq!(supervisor.attempts(), poll);
        }
        assert_eq!(selector.get(), Animation::WifiConnecting);
        assert_eq!(supervisor.radio().connects(), usize::from(WIFI_TRY_ATTEMPTS));

        supervisor.poll().unwrap();
        assert_eq!(state.status(), NetworkStatus::Disconnected);
        assert_eq!(supervisor.radio().connects(), usize::from(WIFI_TRY_ATTEMPTS));
        assert!(!supervisor.is_offline());

        supervisor.poll().unwrap();
        assert!(supervisor.is_offline());
        assert_eq!(supervisor.radio().connects(), usize::from(WIFI_TRY_ATTEMPTS));
    }

    #[test]
    fn test_late_connect_survives_exhaustion() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        supervisor.start();
        for _ in 0..WIFI_TRY_ATTEMPTS {
            supervisor.poll().unwrap();
        }
        assert_eq!(supervisor.attempts(), WIFI_TRY_ATTEMPTS);

        state.handle_event(RadioEvent::Connected);
        assert_eq!(supervisor.poll(), Ok(NetworkStatus::Connected));
        assert_eq!(state.status(), NetworkStatus::Connected);
        assert!(!supervisor.is_offline());

        supervisor.poll().unwrap();
        assert_eq!(state.status(), NetworkStatus::Connected);
        assert!(!supervisor.is_offline());
        assert_eq!(supervisor.radio().connects(), usize::from(WIFI_TRY_ATTEMPTS));
    }

    #[test]
    fn test_restart_resets_attempts() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        supervisor.start();
        for _ in 0..=WIFI_TRY_ATTEMPTS + 1 {
            supervisor.poll().unwrap();
        }
        assert!(supervisor.is_offline());

        supervisor.start();
        supervisor.poll().unwrap();
        assert_eq!(supervisor.attempts(), 1);
        assert!(!supervisor.is_offline());
    }

    #[test]
    fn test_connected_waits_for_gateway_then_renegotiates() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        supervisor.start();
        supervisor.poll().unwrap();
        assert_eq!(
            supervisor.radio().calls,
            vec![RadioCall::Connect("drone-net".to_string())]
        );

        state.handle_event(RadioEvent::Connected);
        supervisor.poll().unwrap();
        assert_eq!(state.status(), NetworkStatus::Connected);
        assert_eq!(supervisor.stage(), ConnectionStage::Dhcp);
        assert_eq!(supervisor.radio().calls.len(), 1);

        state.handle_event(RadioEvent::GotIp {
            gateway: GATEWAY,
            netmask: NETMASK,
        });
        supervisor.poll().unwrap();
        assert_eq!(supervisor.stage(), ConnectionStage::Renegotiating);
        assert_eq!(supervisor.attempts(), 0);
        assert_eq!(state.status(), NetworkStatus::TryingToReconnect);
        assert_eq!(supervisor.radio().calls.last(), Some(&RadioCall::Disconnect));

        // The radio reports the deliberate disconnect late; it must not count
        state.handle_event(RadioEvent::Disconnected);
        assert_eq!(state.status(), NetworkStatus::TryingToReconnect);

        supervisor.poll().unwrap();
        assert!(supervisor.is_static_ip_set());
        assert_eq!(
            supervisor.radio().calls[2..],
            [
                RadioCall::SetStaticIp(Ipv4Addr::new(172, 20, 10, 2), GATEWAY, NETMASK),
                RadioCall::Connect("drone-net".to_string()),
            ]
        );
        assert_eq!(selector.get(), Animation::WifiConnecting);

        state.handle_event(RadioEvent::Connected);
        supervisor.poll().unwrap();
        assert_eq!(supervisor.stage(), ConnectionStage::Established);
        assert_eq!(supervisor.attempts(), 0);
        assert_eq!(selector.get(), Animation::WifiConnected);

        let calls = supervisor.radio().calls.len();
        supervisor.poll().unwrap();
        assert_eq!(supervisor.stage(), ConnectionStage::Established);
        assert_eq!(supervisor.radio().calls.len(), calls);
    }

    /// Radio that reports its disconnects back synchronously
    struct EchoRadio<'a> {
        state: &'a NetworkState,
        inner: MockRadio,
    }

    impl RadioDriver for EchoRadio<'_> {
        type Error = RadioFault;

        fn connect(
            &mut self,
            credentials: &WifiCredentials,
            config: &StationConfig,
        ) -> Result<(), Self::Error> {
            self.inner.connect(credentials, config)
        }

        fn disconnect(&mut self) -> Result<(), Self::Error> {
            self.inner.disconnect()?;
            self.state.handle_event(RadioEvent::Disconnected);
            Ok(())
        }

        fn set_static_ip(
            &mut self,
            ip: Ipv4Addr,
            gateway: Ipv4Addr,
            netmask: Ipv4Addr,
        ) -> Result<(), Self::Error> {
            self.inner.set_static_ip(ip, gateway, netmask)
        }
    }

    #[test]
    fn test_renegotiation_with_synchronous_disconnect_event() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let radio = EchoRadio {
            state: &state,
            inner: MockRadio::default(),
        };
        let mut supervisor = ConnectivitySupervisor::new(
            radio,
            &state,
            &selector,
            WifiCredentials::new("drone-net", "secret").unwrap(),
            SupervisorConfig::default(),
        );
        state.set_gateway(GatewayInfo::new(GATEWAY, NETMASK));
        state.set_status(NetworkStatus::Connected);

        supervisor.poll().unwrap();
        assert_eq!(supervisor.stage(), ConnectionStage::Renegotiating);
        assert_eq!(state.status(), NetworkStatus::TryingToReconnect);

        supervisor.poll().unwrap();
        assert!(supervisor.is_static_ip_set());
        assert_eq!(supervisor.radio().inner.connects(), 1);
    }

    #[test]
    fn test_static_ip_set_once() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        state.set_gateway(GatewayInfo::new(GATEWAY, NETMASK));
        state.set_status(NetworkStatus::TryingToReconnect);

        supervisor.poll().unwrap();
        supervisor.poll().unwrap();
        let static_ips = supervisor
            .radio()
            .calls
            .iter()
            .filter(|call| matches!(call, RadioCall::SetStaticIp(..)))
            .count();
        assert_eq!(static_ips, 1);
        assert_eq!(supervisor.radio().connects(), 2);
    }

    #[test]
    fn test_reconnect_without_gateway_fails() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        state.set_status(NetworkStatus::TryingToReconnect);
        assert_eq!(supervisor.poll(), Err(SupervisorError::MissingGateway));
    }

    #[test]
    fn test_lost_connection_plays_disconnected() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        state.set_gateway(GatewayInfo::new(GATEWAY, NETMASK));
        state.set_status(NetworkStatus::Connected);
        supervisor.poll().unwrap();
        state.handle_event(RadioEvent::Connected);
        supervisor.poll().unwrap();
        supervisor.poll().unwrap();
        assert_eq!(supervisor.stage(), ConnectionStage::Established);

        state.handle_event(RadioEvent::Disconnected);
        supervisor.poll().unwrap();
        assert_eq!(selector.get(), Animation::WifiDisconnected);
        assert_eq!(supervisor.stage(), ConnectionStage::Dhcp);
        assert!(!supervisor.is_offline());
    }

    #[test]
    fn test_disconnect_forces_status() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut supervisor = supervisor(&state, &selector);
        state.set_status(NetworkStatus::TryingToConnect);
        supervisor.disconnect().unwrap();
        assert_eq!(state.status(), NetworkStatus::Disconnected);
        assert_eq!(supervisor.into_radio().calls, vec![RadioCall::Disconnect]);
    }

    #[test]
    fn test_radio_errors_are_returned() {
        let state = NetworkState::new();
        let selector = AnimationSelector::new();
        let mut radio = MockRadio::default();
        radio.fail = true;
        let mut supervisor = ConnectivitySupervisor::new(
            radio,
            &state,
            &selector,
            WifiCredentials::default(),
            SupervisorConfig::default(),
        );
        supervisor.start();
        assert_eq!(supervisor.poll(), Err(SupervisorError::Radio(RadioFault)));
        assert_eq!(supervisor.attempts(), 0);
    }
}
