//! TIA Audio Channel
//!
//! Each channel has its own control/frequency/volume registers, a clock
//! divider, and positions into the shared polynomial tables. On every
//! divider underflow the 5-bit counter steps, the mode's gate is checked,
//! and if it passes the mode's generator decides the new output level.

use serde::{Deserialize, Serialize};

use super::constants::{
    AUDF_MASK, AUDV_MASK, DIV3_MULTIPLIER, MAX_DIVIDER, MAX_VOLUME, POLY4_SIZE, POLY5_SIZE,
    POLY9_SIZE, VOLUME_SHIFT,
};
use super::control::{AudioControl, Gate, Output};
use super::tables::{DIV31, POLY4, POLY5, POLY9};
use crate::TiaSoundError;

/// State of one audio channel
///
/// Deserializing checks every field against the register ranges, so a
/// corrupt save-state is rejected instead of indexing past the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChannelSnapshot")]
pub struct Channel {
    /// Decoded AUDC mode
    control: AudioControl,
    /// Raw AUDF value (0-31)
    frequency: u8,
    /// AUDV scaled to output units (0-120)
    volume: u8,
    /// Current output level (0 or volume)
    output: u8,
    /// Divider countdown; 0 means stopped
    divider_counter: u8,
    /// Divider reload value
    divider_max: u8,
    poly4: u8,
    poly5: u8,
    poly9: u16,
}

/// Unchecked channel fields as stored in a snapshot
#[derive(Debug, Deserialize)]
struct ChannelSnapshot {
    control: AudioControl,
    frequency: u8,
    volume: u8,
    output: u8,
    divider_counter: u8,
    divider_max: u8,
    poly4: u8,
    poly5: u8,
    poly9: u16,
}

fn is_level(value: u8) -> bool {
    value <= MAX_VOLUME && value & ((1 << VOLUME_SHIFT) - 1) == 0
}

impl TryFrom<ChannelSnapshot> for Channel {
    type Error = TiaSoundError;

    fn try_from(s: ChannelSnapshot) -> Result<Self, Self::Error> {
        let invalid = |what: &str| Err(TiaSoundError::ParseError(format!("channel {}", what)));

        if s.frequency > AUDF_MASK {
            return invalid("frequency out of range");
        }
        if !is_level(s.volume) || !is_level(s.output) {
            return invalid("level is not a scaled volume");
        }
        if s.poly4 as usize >= POLY4_SIZE
            || s.poly5 as usize >= POLY5_SIZE
            || s.poly9 as usize >= POLY9_SIZE
        {
            return invalid("polynomial position out of range");
        }

        let channel = Channel {
            control: s.control,
            frequency: s.frequency,
            volume: s.volume,
            output: s.output,
            divider_counter: s.divider_counter,
            divider_max: s.divider_max,
            poly4: s.poly4,
            poly5: s.poly5,
            poly9: s.poly9,
        };
        // A lazy reload may leave the counter above a shortened divider, so
        // only the overall bound and the stopped/running agreement hold.
        if channel.divider_max != channel.divisor()
            || channel.divider_counter > MAX_DIVIDER
            || (channel.divider_counter == 0) != (channel.divider_max == 0)
        {
            return invalid("divider inconsistent with registers");
        }
        Ok(channel)
    }
}

impl Channel {
    /// Create a silent, stopped channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an AUDC write
    pub fn set_control(&mut self, value: u8) {
        self.control = AudioControl::from_register(value);
    }

    /// Store an AUDF write
    pub fn set_frequency(&mut self, value: u8) {
        self.frequency = value & AUDF_MASK;
    }

    /// Store an AUDV write
    pub fn set_volume(&mut self, value: u8) {
        self.volume = (value & AUDV_MASK) << VOLUME_SHIFT;
    }

    /// Recompute the divider after a register write
    ///
    /// SET_TO_1 stops the divider and forces the output to the volume. A new
    /// divisor only reloads the counter if it had run out (or the divider is
    /// being stopped), so a cycle already in progress completes at its old
    /// length.
    pub fn update_divider(&mut self) {
        if self.control == AudioControl::SetToOne {
            self.output = self.volume;
        }
        let divisor = self.divisor();

        if divisor != self.divider_max {
            self.divider_max = divisor;
            if self.divider_counter == 0 || divisor == 0 {
                self.divider_counter = divisor;
            }
        }
    }

    /// Divider length implied by the current control and frequency
    fn divisor(&self) -> u8 {
        if self.control == AudioControl::SetToOne {
            return 0;
        }
        let base = self.frequency + 1;
        if self.control.is_div3() {
            base * DIV3_MULTIPLIER
        } else {
            base
        }
    }

    /// Advance by one native tick
    #[inline]
    pub fn clock(&mut self) {
        match self.divider_counter {
            0 => return,
            1 => self.divider_counter = self.divider_max,
            _ => {
                self.divider_counter -= 1;
                return;
            }
        }

        self.poly5 = Self::step(self.poly5, POLY5_SIZE);

        let waveform = self.control.waveform();
        let gate_open = match waveform.gate {
            Gate::Always => true,
            Gate::Div31 => DIV31[self.poly5 as usize] != 0,
            Gate::Poly5 => POLY5[self.poly5 as usize] != 0,
        };
        if !gate_open {
            return;
        }

        match waveform.output {
            Output::Constant => {}
            Output::Toggle => {
                self.output = if self.output != 0 { 0 } else { self.volume };
            }
            Output::Poly4 => {
                self.poly4 = Self::step(self.poly4, POLY4_SIZE);
                self.output = self.level(POLY4[self.poly4 as usize]);
            }
            Output::Poly5 => {
                self.output = self.level(POLY5[self.poly5 as usize]);
            }
            Output::Poly9 => {
                self.poly9 += 1;
                if self.poly9 as usize == POLY9_SIZE {
                    self.poly9 = 0;
                }
                self.output = self.level(POLY9[self.poly9 as usize]);
            }
        }
    }

    #[inline]
    fn step(index: u8, size: usize) -> u8 {
        let next = index + 1;
        if next as usize == size {
            0
        } else {
            next
        }
    }

    #[inline]
    fn level(&self, bit: u8) -> u8 {
        if bit != 0 {
            self.volume
        } else {
            0
        }
    }

    /// Current output level
    #[inline]
    pub fn output(&self) -> u8 {
        self.output
    }

    /// Decoded control mode
    pub fn control(&self) -> AudioControl {
        self.control
    }

    /// Raw frequency divisor (0-31)
    pub fn frequency(&self) -> u8 {
        self.frequency
    }

    /// Scaled volume (0-120)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Effective divider length in native ticks (0 when stopped)
    pub fn divider_max(&self) -> u8 {
        self.divider_max
    }

    /// Ticks left before the next underflow
    pub fn divider_counter(&self) -> u8 {
        self.divider_counter
    }

    /// Positions in the 4-, 5- and 9-bit polynomials
    pub fn poly_positions(&self) -> (u8, u8, u16) {
        (self.poly4, self.poly5, self.poly9)
    }

    /// Register values as last written: (AUDC, AUDF, AUDV)
    pub fn registers(&self) -> (u8, u8, u8) {
        (
            self.control.value(),
            self.frequency,
            self.volume >> VOLUME_SHIFT,
        )
    }
}
