use core::fmt;
use core::net::Ipv4Addr;

use heapless::String;

/// Longest SSID or password accepted, in bytes
pub const CREDENTIAL_CAPACITY: usize = 32;

/// Station credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String<CREDENTIAL_CAPACITY>,
    pub password: String<CREDENTIAL_CAPACITY>,
}

impl WifiCredentials {
    /// Returns `None` if either value does not fit
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSave {
    None,
    MinModem,
    MaxModem,
}

/// Where the radio stack keeps its own configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStorage {
    Ram,
    Flash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiMode {
    Station,
    AccessPoint,
}

/// Radio stack parameters used for every association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationConfig {
    pub power_save: PowerSave,
    pub storage: ConfigStorage,
    pub mode: WifiMode,
}

impl StationConfig {
    /// Power save off, RAM-backed configuration, station mode
    pub const DEFAULT: Self = Self {
        power_save: PowerSave::None,
        storage: ConfigStorage::Ram,
        mode: WifiMode::Station,
    };
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Radio stack used by the connectivity supervisor.
///
/// Calls only start operations; their outcome is reported back through
/// [`NetworkState::handle_event`](super::NetworkState::handle_event).
pub trait RadioDriver {
    type Error: fmt::Debug;

    /// Start associating with the access point
    fn connect(
        &mut self,
        credentials: &WifiCredentials,
        config: &StationConfig,
    ) -> Result<(), Self::Error>;

    /// Drop the current association
    fn disconnect(&mut self) -> Result<(), Self::Error>;

    /// Stop the DHCP client and use a fixed address from now on
    fn set_static_ip(
        &mut self,
        ip: Ipv4Addr,
        gateway: Ipv4Addr,
        netmask: Ipv4Addr,
    ) -> Result<(), Self::Error>;
}
