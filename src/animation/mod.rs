//! Animation selection shared between the engine and its controllers.
//!
//! The selector is the only value the connectivity supervisor and the HTTP
//! handlers write to steer the LEDs. The engine reads it once per tick.

mod catalog;
mod stages;

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use catalog::program;
pub use stages::{End, Init, Program, Source, Step, Target};

use crate::color::{Color, ORANGE, OFF};

const ANIMATION_NAME_NONE: &str = "none";
const ANIMATION_NAME_IDLE: &str = "idle";
const ANIMATION_NAME_IDLE_DEBUG: &str = "idle_debug";
const ANIMATION_NAME_WIFI_CONNECTING: &str = "wifi_connecting";
const ANIMATION_NAME_WIFI_CONNECTED: &str = "wifi_connected";
const ANIMATION_NAME_WIFI_DISCONNECTED: &str = "wifi_disconnected";

const ANIMATION_ID_NONE: u8 = 0;
const ANIMATION_ID_IDLE: u8 = 1;
const ANIMATION_ID_IDLE_DEBUG: u8 = 2;
const ANIMATION_ID_WIFI_CONNECTING: u8 = 3;
const ANIMATION_ID_WIFI_CONNECTED: u8 = 4;
const ANIMATION_ID_WIFI_DISCONNECTED: u8 = 5;

/// Animations the engine can play
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Animation {
    /// All lights off
    #[default]
    None = ANIMATION_ID_NONE,
    /// Theme color breathing
    Idle = ANIMATION_ID_IDLE,
    /// Idle breathing with one light held in the debug color
    IdleDebug = ANIMATION_ID_IDLE_DEBUG,
    /// Looping chase while a connection attempt is running
    WifiConnecting = ANIMATION_ID_WIFI_CONNECTING,
    /// One-shot sweep, continues with [`Animation::Idle`]
    WifiConnected = ANIMATION_ID_WIFI_CONNECTED,
    /// One-shot warning, continues with [`Animation::None`]
    WifiDisconnected = ANIMATION_ID_WIFI_DISCONNECTED,
}

impl Animation {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_NONE => Self::None,
            ANIMATION_ID_IDLE => Self::Idle,
            ANIMATION_ID_IDLE_DEBUG => Self::IdleDebug,
            ANIMATION_ID_WIFI_CONNECTING => Self::WifiConnecting,
            ANIMATION_ID_WIFI_CONNECTED => Self::WifiConnected,
            ANIMATION_ID_WIFI_DISCONNECTED => Self::WifiDisconnected,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => ANIMATION_NAME_NONE,
            Self::Idle => ANIMATION_NAME_IDLE,
            Self::IdleDebug => ANIMATION_NAME_IDLE_DEBUG,
            Self::WifiConnecting => ANIMATION_NAME_WIFI_CONNECTING,
            Self::WifiConnected => ANIMATION_NAME_WIFI_CONNECTED,
            Self::WifiDisconnected => ANIMATION_NAME_WIFI_DISCONNECTED,
        }
    }

    pub fn parse_from_str(value: &str) -> Option<Self> {
        Some(match value {
            ANIMATION_NAME_NONE => Self::None,
            ANIMATION_NAME_IDLE => Self::Idle,
            ANIMATION_NAME_IDLE_DEBUG => Self::IdleDebug,
            ANIMATION_NAME_WIFI_CONNECTING => Self::WifiConnecting,
            ANIMATION_NAME_WIFI_CONNECTED => Self::WifiConnected,
            ANIMATION_NAME_WIFI_DISCONNECTED => Self::WifiDisconnected,
            _ => return None,
        })
    }

    pub const fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Currently requested animation.
///
/// Writes are single atomic stores and take effect on the next engine tick.
pub struct AnimationSelector {
    current: AtomicU8,
    restart: AtomicBool,
}

impl AnimationSelector {
    pub const fn new() -> Self {
        Self {
            current: AtomicU8::new(ANIMATION_ID_NONE),
            restart: AtomicBool::new(false),
        }
    }

    /// Request an animation
    pub fn set(&self, animation: Animation) {
        self.current.store(animation.to_raw(), Ordering::Release);
    }

    pub fn get(&self) -> Animation {
        Animation::from_raw(self.current.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Request `to` only if `from` is still the requested animation.
    ///
    /// Returns `true` when the request was replaced.
    pub fn replace(&self, from: Animation, to: Animation) -> bool {
        self.current
            .compare_exchange(from.to_raw(), to.to_raw(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Switch to [`Animation::None`] and make the engine forget what it
    /// played last.
    ///
    /// The next animation set afterwards starts from its first stage even
    /// if it is the one that was playing before.
    pub fn reset(&self) {
        self.set(Animation::None);
        self.restart.store(true, Ordering::Release);
    }

    pub(crate) fn take_restart(&self) -> bool {
        self.restart.swap(false, Ordering::AcqRel)
    }
}

impl Default for AnimationSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors the animations pick up at their first stage
pub struct ColorScheme {
    theme: Mutex<CriticalSectionRawMutex, Cell<Color>>,
    debug: Mutex<CriticalSectionRawMutex, Cell<Color>>,
}

impl ColorScheme {
    pub const fn new(theme: Color) -> Self {
        Self {
            theme: Mutex::new(Cell::new(theme)),
            debug: Mutex::new(Cell::new(OFF)),
        }
    }

    /// Color of the idle animations
    pub fn theme(&self) -> Color {
        self.theme.lock(Cell::get)
    }

    pub fn set_theme(&self, color: Color) {
        self.theme.lock(|theme| theme.set(color));
    }

    /// Color of the build indicator in [`Animation::IdleDebug`]
    pub fn debug(&self) -> Color {
        self.debug.lock(Cell::get)
    }

    pub fn set_debug(&self, color: Color) {
        self.debug.lock(|debug| debug.set(color));
    }

    pub fn resolve(&self, source: Source) -> Color {
        match source {
            Source::Theme => self.theme(),
            Source::Debug => self.debug(),
            Source::Fixed(color) => color,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new(ORANGE)
    }
}
