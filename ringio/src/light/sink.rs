// ringio-rs/ringio/src/light/sink.rs

//! Output seam between the compositor and whatever drives the LEDs.

use crate::constants::LIGHT_PIXELS;
use crate::types::LightColor;
use crate::Result;

/// Accepts one flattened 480-color buffer per tick.
///
/// Implement this trait to bridge to concrete hardware (native driver call,
/// USB-serial bridge). The compositor knows nothing beyond this seam.
pub trait LightSink {
    /// Push one complete frame to the hardware.
    fn write(&mut self, colors: &[LightColor; LIGHT_PIXELS]) -> Result<()>;
}

/// Sink that keeps the last written frame in memory. Useful for tests and
/// for rendering previews without hardware.
#[derive(Debug, Default)]
pub struct MemorySink {
    last: Option<[LightColor; LIGHT_PIXELS]>,
    frames: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame, if any was written.
    pub fn last(&self) -> Option<&[LightColor; LIGHT_PIXELS]> {
        self.last.as_ref()
    }

    /// How many frames have been written.
    pub fn frames_written(&self) -> usize {
        self.frames
    }
}

impl LightSink for MemorySink {
    fn write(&mut self, colors: &[LightColor; LIGHT_PIXELS]) -> Result<()> {
        self.last = Some(*colors);
        self.frames += 1;
        Ok(())
    }
}
