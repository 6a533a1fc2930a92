use crate::color::{Channel, MAX_BRIGHTNESS};

/// Channel ranges an animation keeps its colors in while stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBounds {
    pub min_brightness: u8,
    pub max_brightness: u8,
    pub min_color: u8,
    pub max_color: u8,
}

impl StepBounds {
    /// Whole brightness and color range
    pub const FULL: Self = Self::brightness(0, MAX_BRIGHTNESS);

    /// Limit brightness only, color channels keep the full range
    pub const fn brightness(min: u8, max: u8) -> Self {
        Self {
            min_brightness: min,
            max_brightness: max,
            min_color: 0,
            max_color: u8::MAX,
        }
    }

    /// Returns `(min, max)` for the given channel
    pub const fn range(&self, channel: Channel) -> (u8, u8) {
        match channel {
            Channel::Brightness => (self.min_brightness, self.max_brightness),
            Channel::Red | Channel::Green | Channel::Blue => (self.min_color, self.max_color),
        }
    }
}

impl Default for StepBounds {
    fn default() -> Self {
        Self::FULL
    }
}
