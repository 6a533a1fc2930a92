//! Persistent settings.
//!
//! Settings live in a string-keyed store supplied by the board. A missing
//! key is not an error: the compiled-in default is used instead.

use core::fmt;

use heapless::String;

use crate::color::{Color, theme_color};
use crate::network::{CREDENTIAL_CAPACITY, WifiCredentials};

/// Longest value accepted for a string setting, in bytes
pub const MAX_SETTING_LEN: usize = 30;

pub const KEY_WIFI_SSID: &str = "WIFI_SSID";
pub const KEY_WIFI_PASSWORD: &str = "WIFI_PASSWORD";
pub const KEY_COLOR_NUMBER: &str = "COLOR_NUMBER";

/// SSID used until one is stored, taken from `DRONE_WIFI_SSID` at build time
pub const DEFAULT_WIFI_SSID: &str = match option_env!("DRONE_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "Your wifi SSID",
};

/// Password used until one is stored, taken from `DRONE_WIFI_PASSWORD` at
/// build time
pub const DEFAULT_WIFI_PASSWORD: &str = match option_env!("DRONE_WIFI_PASSWORD") {
    Some(password) => password,
    None => "Your wifi password",
};

pub const DEFAULT_COLOR_NUMBER: i32 = 0;

const _: () = assert!(
    DEFAULT_WIFI_SSID.len() <= MAX_SETTING_LEN,
    "DRONE_WIFI_SSID is longer than MAX_SETTING_LEN"
);
const _: () = assert!(
    DEFAULT_WIFI_PASSWORD.len() <= MAX_SETTING_LEN,
    "DRONE_WIFI_PASSWORD is longer than MAX_SETTING_LEN"
);

pub type SettingString = String<CREDENTIAL_CAPACITY>;

/// String-keyed persistent store.
///
/// Getters return `Ok(None)` for a key that was never written.
pub trait KeyValueStore {
    type Error: fmt::Debug;

    fn get_str(&mut self, key: &str) -> Result<Option<SettingString>, Self::Error>;
    fn set_str(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
    fn get_i32(&mut self, key: &str) -> Result<Option<i32>, Self::Error>;
    fn set_i32(&mut self, key: &str, value: i32) -> Result<(), Self::Error>;

    /// Flush pending writes
    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError<E> {
    Store(E),
    /// Value longer than [`MAX_SETTING_LEN`]
    TooLong { key: &'static str, len: usize },
}

impl<E: fmt::Debug> fmt::Display for SettingsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(error) => write!(f, "settings store error: {:?}", error),
            Self::TooLong { key, len } => write!(
                f,
                "{} is {} bytes long, at most {} allowed",
                key, len, MAX_SETTING_LEN
            ),
        }
    }
}

/// User settings kept across restarts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    wifi_ssid: SettingString,
    wifi_password: SettingString,
    color_number: i32,
}

impl Settings {
    pub fn defaults() -> Self {
        Self {
            wifi_ssid: setting_string(DEFAULT_WIFI_SSID),
            wifi_password: setting_string(DEFAULT_WIFI_PASSWORD),
            color_number: DEFAULT_COLOR_NUMBER,
        }
    }

    /// Read all settings, using defaults for keys not stored yet
    pub fn load<S: KeyValueStore>(store: &mut S) -> Result<Self, SettingsError<S::Error>> {
        let mut settings = Self::defaults();
        if let Some(ssid) = store.get_str(KEY_WIFI_SSID).map_err(SettingsError::Store)? {
            settings.wifi_ssid = ssid;
        } else {
            debug!("[Settings.load] {} not stored, using default", KEY_WIFI_SSID);
        }
        if let Some(password) = store
            .get_str(KEY_WIFI_PASSWORD)
            .map_err(SettingsError::Store)?
        {
            settings.wifi_password = password;
        } else {
            debug!("[Settings.load] {} not stored, using default", KEY_WIFI_PASSWORD);
        }
        if let Some(number) = store.get_i32(KEY_COLOR_NUMBER).map_err(SettingsError::Store)? {
            settings.color_number = number;
        }
        Ok(settings)
    }

    pub fn wifi_ssid(&self) -> &str {
        &self.wifi_ssid
    }

    pub fn wifi_password(&self) -> &str {
        &self.wifi_password
    }

    pub const fn color_number(&self) -> i32 {
        self.color_number
    }

    pub fn set_wifi_ssid<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        ssid: &str,
    ) -> Result<(), SettingsError<S::Error>> {
        self.wifi_ssid = store_str(store, KEY_WIFI_SSID, ssid)?;
        Ok(())
    }

    pub fn set_wifi_password<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        password: &str,
    ) -> Result<(), SettingsError<S::Error>> {
        self.wifi_password = store_str(store, KEY_WIFI_PASSWORD, password)?;
        Ok(())
    }

    pub fn set_color_number<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        number: i32,
    ) -> Result<(), SettingsError<S::Error>> {
        store
            .set_i32(KEY_COLOR_NUMBER, number)
            .and_then(|()| store.commit())
            .map_err(SettingsError::Store)?;
        self.color_number = number;
        Ok(())
    }

    /// Write the defaults back to the store
    pub fn reset_to_defaults<S: KeyValueStore>(
        &mut self,
        store: &mut S,
    ) -> Result<(), SettingsError<S::Error>> {
        let defaults = Self::defaults();
        store_str(store, KEY_WIFI_SSID, &defaults.wifi_ssid)?;
        store_str(store, KEY_WIFI_PASSWORD, &defaults.wifi_password)?;
        store
            .set_i32(KEY_COLOR_NUMBER, defaults.color_number)
            .and_then(|()| store.commit())
            .map_err(SettingsError::Store)?;
        *self = defaults;
        Ok(())
    }

    pub fn credentials(&self) -> WifiCredentials {
        WifiCredentials {
            ssid: self.wifi_ssid.clone(),
            password: self.wifi_password.clone(),
        }
    }

    /// Theme color for the stored color number
    pub fn theme_color(&self) -> Color {
        theme_color(self.color_number)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

fn store_str<S: KeyValueStore>(
    store: &mut S,
    key: &'static str,
    value: &str,
) -> Result<SettingString, SettingsError<S::Error>> {
    if value.len() > MAX_SETTING_LEN {
        return Err(SettingsError::TooLong {
            key,
            len: value.len(),
        });
    }
    store
        .set_str(key, value)
        .and_then(|()| store.commit())
        .map_err(SettingsError::Store)?;
    Ok(setting_string(value))
}

/// Values are checked against [`MAX_SETTING_LEN`] before they get here
fn setting_string(value: &str) -> SettingString {
    SettingString::try_from(value).unwrap_or_default()
}
