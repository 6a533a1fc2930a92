use core::fmt;
use core::net::Ipv4Addr;

use embassy_time::{Duration, Ticker};

use super::radio::{RadioDriver, StationConfig, WifiCredentials};
use super::{ConnectionStage, NetworkState, NetworkStatus};
use crate::animation::{Animation, AnimationSelector};

/// Connection attempts per connect or reconnect phase
pub const WIFI_TRY_ATTEMPTS: u8 = 10;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Host part of the static address taken after the first association
const DEFAULT_STATIC_HOST: u8 = 2;

#[derive(Debug, Clone, Copy)]
pub struct SupervisorConfig {
    /// Attempts before giving up and going offline
    pub max_attempts: u8,
    pub poll_interval: Duration,
    /// Host id combined with the gateway's network for the static address
    pub static_host: u8,
    pub station: StationConfig,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            max_attempts: WIFI_TRY_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            static_host: DEFAULT_STATIC_HOST,
            station: StationConfig::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorError<E> {
    /// The radio driver rejected a request
    Radio(E),
    /// Static addressing was requested before DHCP reported a gateway
    MissingGateway,
}

impl<E: fmt::Debug> fmt::Display for SupervisorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radio(error) => write!(f, "radio driver error: {:?}", error),
            Self::MissingGateway => f.write_str("gateway information not available"),
        }
    }
}

/// Address in the gateway's network with the given host id
pub fn static_ip(gateway: Ipv4Addr, netmask: Ipv4Addr, host: u8) -> Ipv4Addr {
    let mask = u32::from(netmask);
    let network = u32::from(gateway) & mask;
    Ipv4Addr::from(network | (u32::from(host) & !mask))
}

/// Drives the radio through connect, static-IP renegotiation and bounded
/// retries, and mirrors progress on the LED animation selector.
///
/// The first DHCP association is only used to learn the gateway. The
/// supervisor then drops it and associates again with a static address in
/// the same network, which is the connection that is kept.
pub struct ConnectivitySupervisor<'a, R: RadioDriver> {
    radio: R,
    state: &'a NetworkState,
    selector: &'a AnimationSelector,
    credentials: WifiCredentials,
    config: SupervisorConfig,

    stage: ConnectionStage,
    attempts: u8,
    last_status: NetworkStatus,
    static_ip_set: bool,
    offline: bool,
}

impl<'a, R: RadioDriver> ConnectivitySupervisor<'a, R> {
    pub fn new(
        radio: R,
        state: &'a NetworkState,
        selector: &'a AnimationSelector,
        credentials: WifiCredentials,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            radio,
            state,
            selector,
            credentials,
            config,
            stage: ConnectionStage::Dhcp,
            attempts: 0,
            last_status: state.status(),
            static_ip_set: false,
            offline: false,
        }
    }

    /// Begin connecting on the next poll
    pub fn start(&mut self) {
        self.state.set_status(NetworkStatus::TryingToConnect);
    }

    /// Run one step of the connection state machine.
    ///
    /// Returns the status the step acted on. Radio errors are returned
    /// as-is; retrying is left to the attempt budget.
    pub fn poll(&mut self) -> Result<NetworkStatus, SupervisorError<R::Error>> {
        let status = self.state.status();
        let entered = status != self.last_status;
        self.last_status = status;

        match status {
            NetworkStatus::Disconnected => self.poll_disconnected(),
            NetworkStatus::TryingToConnect | NetworkStatus::TryingToReconnect => {
                if entered {
                    self.attempts = 0;
                    self.offline = false;
                }
                self.poll_trying(status)?;
            }
            NetworkStatus::Connected => self.poll_connected()?,
        }
        Ok(status)
    }

    fn poll_disconnected(&mut self) {
        if self.stage != ConnectionStage::Dhcp {
            debug!("[ConnectivitySupervisor.poll] connection lost");
            self.selector.set(Animation::WifiDisconnected);
            self.stage = ConnectionStage::Dhcp;
        }
        if self.attempts >= self.config.max_attempts && !self.offline {
            warn!(
                "[ConnectivitySupervisor.poll] giving up after {} attempts",
                self.attempts
            );
            self.offline = true;
        }
    }

    fn poll_trying(&mut self, status: NetworkStatus) -> Result<(), SupervisorError<R::Error>> {
        if self.attempts >= self.config.max_attempts {
            // The callback may have connected us in the meantime
            self.state.transition(status, NetworkStatus::Disconnected);
            return Ok(());
        }

        debug!(
            "[ConnectivitySupervisor.poll] {}, attempt {}",
            status.as_str(),
            self.attempts
        );
        self.selector.set(Animation::WifiConnecting);
        if status == NetworkStatus::TryingToReconnect {
            self.reconnect()?;
        } else {
            self.connect()?;
        }
        self.attempts += 1;
        Ok(())
    }

    fn poll_connected(&mut self) -> Result<(), SupervisorError<R::Error>> {
        match self.stage {
            ConnectionStage::Dhcp => {
                if self.state.gateway().is_empty() {
                    debug!("[ConnectivitySupervisor.poll] waiting for gateway information");
                    return Ok(());
                }
                self.stage = ConnectionStage::Renegotiating;
                self.attempts = 0;
                self.disconnect()?;
                self.state
                    .transition(NetworkStatus::Disconnected, NetworkStatus::TryingToReconnect);
            }
            ConnectionStage::Renegotiating => {
                self.stage = ConnectionStage::Established;
                self.attempts = 0;
                self.selector.set(Animation::WifiConnected);
            }
            ConnectionStage::Established => {}
        }
        Ok(())
    }

    /// Associate with the configured credentials
    pub fn connect(&mut self) -> Result<(), SupervisorError<R::Error>> {
        self.radio
            .connect(&self.credentials, &self.config.station)
            .map_err(SupervisorError::Radio)
    }

    /// Associate again with a static address.
    ///
    /// The address is configured once; later calls only associate.
    pub fn reconnect(&mut self) -> Result<(), SupervisorError<R::Error>> {
        if !self.static_ip_set {
            let (gateway, netmask) = self
                .state
                .gateway()
                .addresses()
                .ok_or(SupervisorError::MissingGateway)?;
            let ip = static_ip(gateway, netmask, self.config.static_host);
            debug!("[ConnectivitySupervisor.reconnect] static address {}", ip);
            self.radio
                .set_static_ip(ip, gateway, netmask)
                .map_err(SupervisorError::Radio)?;
            self.static_ip_set = true;
        }
        self.connect()
    }

    /// Drop the association and mark the network disconnected
    pub fn disconnect(&mut self) -> Result<(), SupervisorError<R::Error>> {
        self.radio.disconnect().map_err(SupervisorError::Radio)?;
        self.state.set_status(NetworkStatus::Disconnected);
        Ok(())
    }

    /// Poll forever at the configured interval.
    ///
    /// Only returns on a radio error.
    pub async fn run(&mut self) -> Result<(), SupervisorError<R::Error>> {
        self.start();
        let mut ticker = Ticker::every(self.config.poll_interval);
        loop {
            self.poll()?;
            ticker.next().await;
        }
    }

    pub fn set_credentials(&mut self, credentials: WifiCredentials) {
        self.credentials = credentials;
    }

    pub fn credentials(&self) -> &WifiCredentials {
        &self.credentials
    }

    pub const fn stage(&self) -> ConnectionStage {
        self.stage
    }

    pub const fn attempts(&self) -> u8 {
        self.attempts
    }

    pub const fn is_static_ip_set(&self) -> bool {
        self.static_ip_set
    }

    /// `true` once the attempt budget ran out.
    ///
    /// Cleared when a new connection attempt starts.
    pub const fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Stop supervising and hand back the radio driver
    pub fn into_radio(self) -> R {
        self.radio
    }
}
