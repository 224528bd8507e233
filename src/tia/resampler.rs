//! Fixed-point rate conversion
//!
//! Converts the native audio clock to the host sample rate with an 8.8
//! fixed-point accumulator. Every native tick drains one unit (256); once
//! less than one unit remains, one output sample is due and the
//! native/output ratio is added back.

use serde::{Deserialize, Serialize};

use super::constants::{FIXED_POINT_BITS, FIXED_POINT_ONE};
use crate::{Result, TiaSoundError};

/// Native-tick to output-sample accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResamplerSnapshot")]
pub struct Resampler {
    /// Remaining budget in 1/256 native ticks
    accumulator: u32,
    /// Native ticks per output sample, 8.8 fixed point
    step: u16,
}

#[derive(Debug, Deserialize)]
struct ResamplerSnapshot {
    accumulator: u32,
    step: u16,
}

impl TryFrom<ResamplerSnapshot> for Resampler {
    type Error = TiaSoundError;

    fn try_from(s: ResamplerSnapshot) -> Result<Self> {
        // After a refill the budget is at most one step plus one unit
        if u32::from(s.step) < FIXED_POINT_ONE
            || s.accumulator >= u32::from(s.step) + FIXED_POINT_ONE
        {
            return Err(TiaSoundError::ParseError(format!(
                "resampler accumulator {} / step {} out of range",
                s.accumulator, s.step
            )));
        }
        Ok(Resampler {
            accumulator: s.accumulator,
            step: s.step,
        })
    }
}

impl Resampler {
    /// Create an accumulator for the given rates
    pub fn new(native_clock_hz: u32, output_sample_rate_hz: u32) -> Result<Self> {
        Ok(Resampler {
            accumulator: 0,
            step: Self::compute_step(native_clock_hz, output_sample_rate_hz)?,
        })
    }

    /// Compute `(native << 8) / output`, rejecting rates the accumulator cannot represent
    pub fn compute_step(native_clock_hz: u32, output_sample_rate_hz: u32) -> Result<u16> {
        if native_clock_hz == 0 {
            return Err(TiaSoundError::InvalidConfiguration(
                "native clock must be greater than zero".to_string(),
            ));
        }
        if output_sample_rate_hz == 0 {
            return Err(TiaSoundError::InvalidConfiguration(
                "output sample rate must be greater than zero".to_string(),
            ));
        }
        if output_sample_rate_hz > native_clock_hz {
            return Err(TiaSoundError::InvalidConfiguration(format!(
                "output sample rate {} Hz exceeds native clock {} Hz",
                output_sample_rate_hz, native_clock_hz
            )));
        }

        let step =
            (u64::from(native_clock_hz) << FIXED_POINT_BITS) / u64::from(output_sample_rate_hz);
        u16::try_from(step).map_err(|_| {
            TiaSoundError::InvalidConfiguration(format!(
                "ratio {} Hz / {} Hz does not fit the 16-bit accumulator (step {})",
                native_clock_hz, output_sample_rate_hz, step
            ))
        })
    }

    /// Account for one native tick; returns true when an output sample is due
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.accumulator = self.accumulator.saturating_sub(FIXED_POINT_ONE);
        if self.accumulator < FIXED_POINT_ONE {
            self.accumulator += u32::from(self.step);
            true
        } else {
            false
        }
    }

    /// Clear the accumulator, keeping the ratio
    pub fn reset(&mut self) {
        self.accumulator = 0;
    }

    /// Native ticks per output sample in 8.8 fixed point
    pub fn step(&self) -> u16 {
        self.step
    }
}
