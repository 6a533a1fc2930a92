//! LED strip output.

use core::fmt;

use smart_leds::SmartLedsWrite;

use crate::LED_COUNT;
use crate::color::Rgb;

/// Bytes per serialized frame, three per element
pub const FRAME_BYTES: usize = LED_COUNT * 3;

/// Colors of all elements for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub pixels: [Rgb; LED_COUNT],
}

impl Frame {
    pub const fn blank() -> Self {
        Self {
            pixels: [Rgb { r: 0, g: 0, b: 0 }; LED_COUNT],
        }
    }

    /// Serialize in the strip's wire order: green, red, blue per element
    pub fn to_grb_bytes(&self) -> [u8; FRAME_BYTES] {
        let mut bytes = [0; FRAME_BYTES];
        for (chunk, pixel) in bytes.chunks_exact_mut(3).zip(self.pixels.iter()) {
            chunk[0] = pixel.g;
            chunk[1] = pixel.r;
            chunk[2] = pixel.b;
        }
        bytes
    }
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// `write` must return once the frame has been transmitted.
pub trait OutputDriver {
    type Error: fmt::Debug;

    /// Write one frame to the LED strip
    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Output through any `smart-leds` driver
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: fmt::Debug,
{
    type Error = W::Error;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.writer.write(frame.pixels.iter().copied())
    }
}

/// LED output failed while the engine was starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputError<E>(pub E);

impl<E: fmt::Debug> fmt::Display for OutputError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED output failed: {:?}", self.0)
    }
}
