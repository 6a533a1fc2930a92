//! Single animatable light element.

use crate::bounds::StepBounds;
use crate::color::{Channel, Color, OFF};

/// A light that steps its `current` color towards a `target` color
#[derive(Debug, Clone, Copy, Default)]
pub struct LightElement {
    current: Color,
    target: Color,
}

impl LightElement {
    /// Element with both colors off
    pub const fn new() -> Self {
        Self {
            current: OFF,
            target: OFF,
        }
    }

    pub const fn current(&self) -> Color {
        self.current
    }

    pub const fn target(&self) -> Color {
        self.target
    }

    /// Jump to `color` with nothing left to animate
    pub fn set_color(&mut self, color: Color) {
        self.current = color;
        self.target = color;
    }

    pub fn set_current(&mut self, color: Color) {
        self.current = color;
    }

    pub fn set_target(&mut self, color: Color) {
        self.target = color;
    }

    pub fn set_current_brightness(&mut self, brightness: u8) {
        self.current = self.current.with_brightness(brightness);
    }

    pub fn set_target_brightness(&mut self, brightness: u8) {
        self.target = self.target.with_brightness(brightness);
    }

    pub fn set_off(&mut self) {
        self.set_color(OFF);
    }

    /// Move every channel of `current` up to `speed` towards `target`.
    ///
    /// A channel never passes its target and is saturated into `bounds`
    /// when it moves. Channels already on target are left alone.
    ///
    /// Returns `true` once the element is settled. Settling is decided by
    /// [`Color`] equality, so it only looks at brightness: the color
    /// channels may still be on their way.
    pub fn advance(&mut self, speed: u8, bounds: &StepBounds) -> bool {
        let speed = i16::from(speed);
        for channel in Channel::ALL {
            let current = i16::from(self.current.get(channel));
            let target = i16::from(self.target.get(channel));
            let next = if current < target {
                (current + speed).min(target)
            } else if current > target {
                (current - speed).max(target)
            } else {
                continue;
            };
            let (min, max) = bounds.range(channel);
            self.current.set(channel, next, min, max);
        }
        self.current == self.target
    }
}
