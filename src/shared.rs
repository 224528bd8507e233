//! Thread-shared chip handle
//!
//! [`TiaSound`] itself is single-threaded. When an emulator writes registers
//! on its CPU thread and an audio callback pulls samples on another, both
//! sides go through one lock per chip instance.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::TiaConfig;
use crate::tia::TiaSound;
use crate::Result;

/// Cloneable, lock-protected handle to one chip
#[derive(Debug, Clone)]
pub struct SharedTiaSound {
    chip: Arc<Mutex<TiaSound>>,
}

impl SharedTiaSound {
    /// Wrap an existing chip
    pub fn new(chip: TiaSound) -> Self {
        SharedTiaSound {
            chip: Arc::new(Mutex::new(chip)),
        }
    }

    /// Build a chip from a configuration and wrap it
    pub fn with_config(config: &TiaConfig) -> Result<Self> {
        Ok(Self::new(TiaSound::with_config(config)?))
    }

    /// Write one audio register
    pub fn update(&self, address: u16, value: u8) {
        self.chip.lock().update(address, value);
    }

    /// Apply a batch of register writes in order under a single lock
    pub fn update_all(&self, writes: &[(u16, u8)]) {
        let mut chip = self.chip.lock();
        for &(address, value) in writes {
            chip.update(address, value);
        }
    }

    /// Pull one sample
    pub fn get_sample(&self) -> u8 {
        self.chip.lock().get_sample()
    }

    /// Fill a buffer under a single lock
    pub fn fill_buffer(&self, buffer: &mut [u8]) {
        self.chip.lock().fill_buffer(buffer);
    }

    /// Exclusive access for anything not covered above
    pub fn lock(&self) -> MutexGuard<'_, TiaSound> {
        self.chip.lock()
    }
}
