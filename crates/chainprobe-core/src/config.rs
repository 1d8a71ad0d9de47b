//! Probe engine configuration.

use crate::{Error, Result};

/// Default analysis frame size (radix-2, order 12).
pub const DEFAULT_FRAME_SIZE: usize = 4096;

/// Default cumulative-energy fraction for the spectral rolloff.
pub const DEFAULT_ROLLOFF_PERCENT: f32 = 0.95;

/// Configuration for the probe engine.
///
/// The frame size and rolloff fraction are fixed at construction; the
/// analysis pipeline carries no ambient global state.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub sample_rate: f64,
    pub frame_size: usize,
    pub rolloff_percent: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            frame_size: DEFAULT_FRAME_SIZE,
            rolloff_percent: DEFAULT_ROLLOFF_PERCENT,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate < 8000.0 || self.sample_rate > 384000.0 {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.frame_size < 32 || !self.frame_size.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "frame_size {} must be a power of two >= 32",
                self.frame_size
            )));
        }
        if self.rolloff_percent <= 0.0 || self.rolloff_percent > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "rolloff_percent {} out of range (0-1]",
                self.rolloff_percent
            )));
        }
        Ok(())
    }
}
