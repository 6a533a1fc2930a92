//! WiFi connectivity.
//!
//! [`NetworkState`] is written from two places: the supervisor's poll task
//! and the radio stack's event callback. Every access goes through one
//! critical-section mutex so a status change from the callback can never
//! interleave with a transition in the poll task.

mod radio;
mod supervisor;

use core::cell::RefCell;
use core::net::Ipv4Addr;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use radio::{
    ConfigStorage, PowerSave, RadioDriver, StationConfig, WifiCredentials, WifiMode,
    CREDENTIAL_CAPACITY,
};
pub use supervisor::{
    ConnectivitySupervisor, DEFAULT_POLL_INTERVAL, SupervisorConfig, SupervisorError,
    WIFI_TRY_ATTEMPTS, static_ip,
};

/// Connection state of the station interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkStatus {
    #[default]
    Disconnected,
    TryingToConnect,
    TryingToReconnect,
    Connected,
}

impl NetworkStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::TryingToConnect => "trying_to_connect",
            Self::TryingToReconnect => "trying_to_reconnect",
            Self::Connected => "connected",
        }
    }
}

/// Progress through the connected state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionStage {
    /// Associated through DHCP, waiting for gateway information
    #[default]
    Dhcp = 0,
    /// Re-associated with a static address
    Renegotiating = 1,
    /// Steady state
    Established = 2,
}

/// Gateway and netmask handed out by DHCP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayInfo {
    pub gateway: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
}

impl GatewayInfo {
    pub const fn new(gateway: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            gateway: Some(gateway),
            netmask: Some(netmask),
        }
    }

    /// Empty until both addresses are known
    pub const fn is_empty(&self) -> bool {
        self.gateway.is_none() || self.netmask.is_none()
    }

    /// Both addresses, if known
    pub fn addresses(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        Some((self.gateway?, self.netmask?))
    }
}

/// Events raised by the radio stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    /// Station associated with the access point
    Connected,
    /// Station lost the association
    Disconnected,
    /// DHCP lease acquired
    GotIp {
        gateway: Ipv4Addr,
        netmask: Ipv4Addr,
    },
}

#[derive(Debug)]
struct Shared {
    status: NetworkStatus,
    gateway: GatewayInfo,
}

/// Network status and gateway information shared with the event callback
pub struct NetworkState {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Shared>>,
}

impl NetworkState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Shared {
                status: NetworkStatus::Disconnected,
                gateway: GatewayInfo {
                    gateway: None,
                    netmask: None,
                },
            })),
        }
    }

    pub fn status(&self) -> NetworkStatus {
        self.inner.lock(|shared| shared.borrow().status)
    }

    pub fn set_status(&self, status: NetworkStatus) {
        self.inner.lock(|shared| shared.borrow_mut().status = status);
    }

    /// Set `to` only if the status is still `from`.
    ///
    /// Returns `true` when the status was changed.
    pub fn transition(&self, from: NetworkStatus, to: NetworkStatus) -> bool {
        self.inner.lock(|shared| {
            let mut shared = shared.borrow_mut();
            if shared.status == from {
                shared.status = to;
                true
            } else {
                false
            }
        })
    }

    pub fn gateway(&self) -> GatewayInfo {
        self.inner.lock(|shared| shared.borrow().gateway)
    }

    pub fn set_gateway(&self, gateway: GatewayInfo) {
        self.inner.lock(|shared| shared.borrow_mut().gateway = gateway);
    }

    /// Apply a radio event.
    ///
    /// Safe to call from the radio stack's own context. A disconnect only
    /// counts while connected; during a retry it would reset the attempt
    /// budget for nothing.
    pub fn handle_event(&self, event: RadioEvent) {
        match event {
            RadioEvent::Connected => {
                debug!("[NetworkState.handle_event] associated");
                self.set_status(NetworkStatus::Connected);
            }
            RadioEvent::Disconnected => {
                if self.transition(NetworkStatus::Connected, NetworkStatus::Disconnected) {
                    debug!("[NetworkState.handle_event] association lost");
                }
            }
            RadioEvent::GotIp { gateway, netmask } => {
                debug!(
                    "[NetworkState.handle_event] gateway {} netmask {}",
                    gateway, netmask
                );
                self.set_gateway(GatewayInfo::new(gateway, netmask));
            }
        }
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}
