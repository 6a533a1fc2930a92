use super::Animation;
use crate::LED_COUNT;
use crate::bounds::StepBounds;
use crate::color::Color;

/// Where an element takes its color from
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// User selected theme color
    Theme,
    /// Build indicator color
    Debug,
    Fixed(Color),
}

/// First stage setup of one element.
///
/// Both colors take the RGB of `source`, `current` starts at brightness
/// `from` and `target` is set to brightness `to`.
#[derive(Debug, Clone, Copy)]
pub struct Init {
    pub source: Source,
    pub from: u8,
    pub to: u8,
}

impl Init {
    pub const fn new(source: Source, from: u8, to: u8) -> Self {
        Self { source, from, to }
    }
}

/// New goal for one element once a stage completes
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Keep,
    /// Change target brightness, keep target color
    Brightness(u8),
    /// Replace the whole target color
    Color(Color),
    /// Jump current and target to the source color
    Snap(Source),
}

pub type Step = [Target; LED_COUNT];

/// What happens after the last step
#[derive(Debug, Clone, Copy)]
pub enum End {
    /// Continue with the given stage
    Repeat(u8),
    /// Wait for the last step to settle, then select another animation
    Switch(Animation),
}

/// A staged animation.
///
/// Stage 0 applies `init`. Every later stage advances all elements, and
/// once they settle the matching entry of `steps` is applied and the next
/// stage begins.
#[derive(Debug)]
pub struct Program {
    pub speed: u8,
    pub bounds: StepBounds,
    pub init: [Init; LED_COUNT],
    pub steps: &'static [Step],
    pub end: End,
}

/// Step setting only target brightness on every element
pub(crate) const fn levels(levels: [u8; LED_COUNT]) -> Step {
    let mut step = [Target::Keep; LED_COUNT];
    let mut i = 0;
    while i < LED_COUNT {
        step[i] = Target::Brightness(levels[i]);
        i += 1;
    }
    step
}

/// Step moving every element towards `color` at the given brightness
pub(crate) const fn tinted(color: Color, levels: [u8; LED_COUNT]) -> Step {
    let mut step = [Target::Keep; LED_COUNT];
    let mut i = 0;
    while i < LED_COUNT {
        step[i] = Target::Color(color.with_brightness(levels[i]));
        i += 1;
    }
    step
}
