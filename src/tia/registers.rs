//! TIA audio register map
//!
//! Six write-only registers, one control/frequency/volume triple per channel.
//! Any other address on the bus has no audio effect.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::constants::{AUDC0, AUDC1, AUDF0, AUDF1, AUDV0, AUDV1};

/// Kind of audio register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// AUDCx: waveform mode
    Control,
    /// AUDFx: frequency divisor
    Frequency,
    /// AUDVx: volume
    Volume,
}

/// Audio register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
pub enum Register {
    /// Channel 0 control
    Audc0 = AUDC0,
    /// Channel 1 control
    Audc1 = AUDC1,
    /// Channel 0 frequency
    Audf0 = AUDF0,
    /// Channel 1 frequency
    Audf1 = AUDF1,
    /// Channel 0 volume
    Audv0 = AUDV0,
    /// Channel 1 volume
    Audv1 = AUDV1,
}

impl Register {
    /// All audio registers in dump order
    pub const ALL: [Register; 6] = [
        Register::Audc0,
        Register::Audc1,
        Register::Audf0,
        Register::Audf1,
        Register::Audv0,
        Register::Audv1,
    ];

    /// Decode a bus address; `None` for anything outside the audio map
    pub fn from_address(address: u16) -> Option<Self> {
        Register::from_u16(address)
    }

    /// Bus address of this register
    pub fn address(self) -> u16 {
        self as u16
    }

    /// Channel the register belongs to
    pub fn channel(self) -> usize {
        match self {
            Register::Audc0 | Register::Audf0 | Register::Audv0 => 0,
            Register::Audc1 | Register::Audf1 | Register::Audv1 => 1,
        }
    }

    /// Which of the three channel registers this is
    pub fn kind(self) -> RegisterKind {
        match self {
            Register::Audc0 | Register::Audc1 => RegisterKind::Control,
            Register::Audf0 | Register::Audf1 => RegisterKind::Frequency,
            Register::Audv0 | Register::Audv1 => RegisterKind::Volume,
        }
    }
}
