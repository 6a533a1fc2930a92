mod palette;

pub use palette::*;

use crate::bounds::StepBounds;

pub type Rgb = smart_leds::RGB8;

/// Highest brightness a color can carry, in percent
pub const MAX_BRIGHTNESS: u8 = 100;

/// One of the four channels a [`Color`] is animated on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Brightness,
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Brightness,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
    ];
}

/// RGB color with a brightness percentage.
///
/// Brightness is capped at [`MAX_BRIGHTNESS`] by every constructor and
/// setter. Channel setters saturate out-of-range input into the requested
/// range instead of wrapping.
///
/// Two colors compare equal when their **brightness** is equal; the color
/// channels are ignored. Use [`Color::same_rgb`] to compare those.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    brightness: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, brightness: u8) -> Self {
        Self {
            r,
            g,
            b,
            brightness: if brightness > MAX_BRIGHTNESS {
                MAX_BRIGHTNESS
            } else {
                brightness
            },
        }
    }

    /// Full brightness color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, MAX_BRIGHTNESS)
    }

    /// Same color channels, different brightness
    pub const fn with_brightness(self, brightness: u8) -> Self {
        Self::new(self.r, self.g, self.b, brightness)
    }

    pub const fn r(self) -> u8 {
        self.r
    }

    pub const fn g(self) -> u8 {
        self.g
    }

    pub const fn b(self) -> u8 {
        self.b
    }

    pub const fn brightness(self) -> u8 {
        self.brightness
    }

    pub const fn get(self, channel: Channel) -> u8 {
        match channel {
            Channel::Brightness => self.brightness,
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Set a channel, saturating `value` into `[min, max]`.
    ///
    /// Brightness is additionally capped at [`MAX_BRIGHTNESS`].
    pub fn set(&mut self, channel: Channel, value: i16, min: u8, max: u8) {
        let value = saturate(value, min, max);
        match channel {
            Channel::Brightness => self.brightness = value.min(MAX_BRIGHTNESS),
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }

    pub fn set_red(&mut self, value: i16, min: u8, max: u8) {
        self.set(Channel::Red, value, min, max);
    }

    pub fn set_green(&mut self, value: i16, min: u8, max: u8) {
        self.set(Channel::Green, value, min, max);
    }

    pub fn set_blue(&mut self, value: i16, min: u8, max: u8) {
        self.set(Channel::Blue, value, min, max);
    }

    pub fn set_brightness(&mut self, value: i16, min: u8, max: u8) {
        self.set(Channel::Brightness, value, min, max);
    }

    /// Saturate every channel into `bounds`
    #[must_use]
    pub fn clamp(self, bounds: &StepBounds) -> Self {
        let mut clamped = self;
        for channel in Channel::ALL {
            let (min, max) = bounds.range(channel);
            clamped.set(channel, i16::from(self.get(channel)), min, max);
        }
        clamped
    }

    /// Compare the color channels, ignoring brightness
    pub const fn same_rgb(self, other: Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Scale the color channels by brightness for output
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: scale(self.r, self.brightness),
            g: scale(self.g, self.brightness),
            b: scale(self.b, self.brightness),
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.brightness == other.brightness
    }
}

impl Eq for Color {}

fn saturate(value: i16, min: u8, max: u8) -> u8 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let clamped = value.clamp(i16::from(min), i16::from(max));
    u8::try_from(clamped).unwrap_or(max)
}

fn scale(channel: u8, brightness: u8) -> u8 {
    let scaled = u16::from(channel) * u16::from(brightness) / u16::from(MAX_BRIGHTNESS);
    u8::try_from(scaled).unwrap_or(u8::MAX)
}
