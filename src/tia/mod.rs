//! TIA Sound Emulation
//!
//! Register-level model of the audio half of the Atari 2600 Television
//! Interface Adapter: two channels, each a clock divider driving 4-, 5- and
//! 9-bit polynomial counters, resampled from the native audio clock to the
//! host rate by a fixed-point accumulator.
//!
//! The chip is a plain synchronous state machine. Register writes and sample
//! pulls may be interleaved in any order; writes take effect on the next
//! native tick.

pub mod channel;
pub mod constants;
pub mod control;
pub mod registers;
pub mod resampler;
pub mod tables;
pub mod tick_counter;

pub use channel::Channel;
pub use constants::*;
pub use control::{AudioControl, ControlBits, Gate, Output, Waveform};
pub use registers::{Register, RegisterKind};
pub use resampler::Resampler;
pub use tick_counter::TickCounter;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::TiaConfig;
use crate::Result;

/// TIA audio chip
///
/// ```
/// use tia_sound::tia::{TiaSound, AUDC0, AUDV0};
/// let mut chip = TiaSound::new(31_400, 31_400).unwrap();
/// chip.update(AUDV0, 0x0F);
/// chip.update(AUDC0, 0x00); // SET_TO_1
/// assert_eq!(chip.get_sample(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiaSound {
    channels: [Channel; CHANNEL_COUNT],
    resampler: Resampler,
    ticks: TickCounter,
}

impl TiaSound {
    /// Create a chip converting `native_clock_hz` ticks to `output_sample_rate_hz` samples
    ///
    /// Fails with [`crate::TiaSoundError::InvalidConfiguration`] when either rate is
    /// zero, the output rate exceeds the native clock, or the ratio does not fit
    /// the 16-bit accumulator.
    ///
    /// Only decimation is supported: every output sample costs at least one
    /// native tick, so upsampling (e.g. 31 400 Hz to 44 100 Hz) is left to the
    /// host's mixer. Run the chip at or below the native clock and resample the
    /// result if a higher device rate is needed.
    pub fn new(native_clock_hz: u32, output_sample_rate_hz: u32) -> Result<Self> {
        let resampler = Resampler::new(native_clock_hz, output_sample_rate_hz)?;
        debug!(
            "TIA sound: native clock {} Hz, output {} Hz, step {:#06x}",
            native_clock_hz,
            output_sample_rate_hz,
            resampler.step()
        );
        Ok(TiaSound {
            channels: Default::default(),
            resampler,
            ticks: TickCounter::new(),
        })
    }

    /// Create a chip from a configuration
    pub fn with_config(config: &TiaConfig) -> Result<Self> {
        Self::new(config.native_clock_hz, config.output_sample_rate_hz)
    }

    /// Write an audio register
    ///
    /// Addresses outside AUDC0..AUDV1 are ignored.
    pub fn update(&mut self, address: u16, value: u8) {
        let Some(channel) = self.decode(address, value) else {
            trace!("TIA write to unmapped address {:#04x} ignored", address);
            return;
        };
        self.channels[channel].update_divider();
    }

    /// Store a register write; returns the affected channel
    fn decode(&mut self, address: u16, value: u8) -> Option<usize> {
        let register = Register::from_address(address)?;
        if register.kind() == RegisterKind::Control {
            let control = AudioControl::from_register(value);
            trace!("TIA {:?} <- {:?} {:?}", register, control, control.bits());
        } else {
            trace!("TIA {:?} <- {:#04x}", register, value);
        }

        let channel = &mut self.channels[register.channel()];
        match register.kind() {
            RegisterKind::Control => channel.set_control(value),
            RegisterKind::Frequency => channel.set_frequency(value),
            RegisterKind::Volume => channel.set_volume(value),
        }
        Some(register.channel())
    }

    /// Advance both channels by one native tick
    #[inline]
    pub fn clock(&mut self) {
        for channel in &mut self.channels {
            channel.clock();
        }
        self.ticks.clock();
    }

    /// Run the chip until the next output sample is due and return it
    ///
    /// The sample is the sum of both channel levels (at most 240).
    pub fn get_sample(&mut self) -> u8 {
        loop {
            self.clock();
            if self.resampler.tick() {
                return self.mixed_output();
            }
        }
    }

    /// Fill `buffer` with consecutive samples
    pub fn fill_buffer(&mut self, buffer: &mut [u8]) {
        for sample in buffer.iter_mut() {
            *sample = self.get_sample();
        }
    }

    /// Current sum of both channel levels
    #[inline]
    pub fn mixed_output(&self) -> u8 {
        self.channels[0]
            .output()
            .saturating_add(self.channels[1].output())
    }

    /// Re-zero all channel and accumulator state, keeping the sample rate
    pub fn reset(&mut self) {
        debug!("TIA sound reset");
        self.channels = Default::default();
        self.resampler.reset();
        self.ticks.reset();
    }

    /// Read-only view of a channel
    ///
    /// # Panics
    /// If `index >= CHANNEL_COUNT`.
    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Register values as last written, in address order AUDC0..AUDV1
    pub fn dump_registers(&self) -> [u8; 6] {
        let (c0, f0, v0) = self.channels[0].registers();
        let (c1, f1, v1) = self.channels[1].registers();
        [c0, c1, f0, f1, v0, v1]
    }

    /// Native ticks processed since construction or reset
    pub fn native_ticks(&self) -> u64 {
        self.ticks.get_ticks()
    }

    /// Native ticks per output sample, 8.8 fixed point
    pub fn accumulator_step(&self) -> u16 {
        self.resampler.step()
    }
}
