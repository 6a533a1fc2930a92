//! Shared state of the firmware.
//!
//! A board creates one [`SystemState`] in a `static` and lends references
//! to the tasks and HTTP handlers that need them.
//!
//! ```ignore
//! static SYSTEM: SystemState = SystemState::new();
//!
//! let engine = AnimationEngine::new(leds, &SYSTEM.animation, &SYSTEM.colors)?;
//! let supervisor = ConnectivitySupervisor::new(
//!     radio,
//!     &SYSTEM.network,
//!     &SYSTEM.animation,
//!     settings.credentials(),
//!     SupervisorConfig::default(),
//! );
//! ```

use crate::animation::{Animation, AnimationSelector, ColorScheme};
use crate::color::{ORANGE, theme_color};
use crate::control::ControlCommand;
use crate::motor::MotionControl;
use crate::network::NetworkState;

pub struct SystemState {
    pub animation: AnimationSelector,
    pub colors: ColorScheme,
    pub network: NetworkState,
    pub motion: MotionControl,
}

impl SystemState {
    pub const fn new() -> Self {
        Self {
            animation: AnimationSelector::new(),
            colors: ColorScheme::new(ORANGE),
            network: NetworkState::new(),
            motion: MotionControl::new(),
        }
    }

    /// Apply a parsed control request
    pub fn dispatch(&self, command: ControlCommand) {
        debug!("[SystemState.dispatch] {:?}", command);
        match command {
            ControlCommand::Connect => self.animation.set(Animation::Idle),
            ControlCommand::Disconnect => {
                self.motion.stop();
                self.animation.set(Animation::None);
            }
            ControlCommand::Move(data) => self.motion.set(data),
            ControlCommand::SetColor(number) => {
                self.colors.set_theme(theme_color(number));
                // Restart so the running animation picks up the new color
                let current = self.animation.get();
                self.animation.reset();
                self.animation.set(current);
            }
        }
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}
