//! Native tick accounting
//!
//! Counts audio-clock ticks so hosts can correlate emitted samples with
//! elapsed chip time.

use serde::{Deserialize, Serialize};

/// Native audio-clock tick counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounter {
    ticks: u64,
}

impl TickCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        TickCounter { ticks: 0 }
    }

    /// Count one native tick
    #[inline]
    pub fn clock(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Ticks counted so far
    pub fn get_ticks(&self) -> u64 {
        self.ticks
    }

    /// Back to zero
    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}
