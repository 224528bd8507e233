//! Chip Configuration
//!
//! Native clock and output rate for a [`crate::TiaSound`] instance. Hosts can
//! embed this in their own settings (it is `serde`-serializable) or load it
//! from a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tia::constants::{NTSC_AUDIO_CLOCK_HZ, PAL_AUDIO_CLOCK_HZ};
use crate::tia::Resampler;
use crate::{Result, TiaSoundError};

/// Sample rate configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiaConfig {
    /// Native audio clock in Hz (TIA color clock / 114)
    pub native_clock_hz: u32,
    /// Host output sample rate in Hz
    pub output_sample_rate_hz: u32,
}

impl TiaConfig {
    /// NTSC console clock at the given output rate
    pub fn ntsc(output_sample_rate_hz: u32) -> Self {
        TiaConfig {
            native_clock_hz: NTSC_AUDIO_CLOCK_HZ,
            output_sample_rate_hz,
        }
    }

    /// PAL console clock at the given output rate
    pub fn pal(output_sample_rate_hz: u32) -> Self {
        TiaConfig {
            native_clock_hz: PAL_AUDIO_CLOCK_HZ,
            output_sample_rate_hz,
        }
    }

    /// Check the rates and return the accumulator step they produce
    pub fn validate(&self) -> Result<u16> {
        Resampler::compute_step(self.native_clock_hz, self.output_sample_rate_hz)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TiaConfig = serde_json::from_str(json)
            .map_err(|e| TiaSoundError::ParseError(format!("Invalid TIA config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TiaSoundError::Other(format!("Failed to serialize TIA config: {}", e)))
    }
}

impl Default for TiaConfig {
    fn default() -> Self {
        Self::ntsc(NTSC_AUDIO_CLOCK_HZ)
    }
}
