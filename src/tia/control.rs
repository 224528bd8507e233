//! Audio control (AUDC) decoding
//!
//! The low nibble of AUDCx selects one of 16 waveform modes. Rather than
//! re-testing raw bits on every divider underflow, each mode resolves once to
//! a [`Waveform`]: which gate decides whether the output may change, which
//! generator produces the next level, and whether the divider runs at 1/3.

use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::constants::AUDC_MASK;

bitflags! {
    /// Raw AUDC bit meanings
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ControlBits: u8 {
        /// With GATED: gate on the 5-bit polynomial instead of the div-31 pulse
        const POLY5_SELECT = 0x01;
        /// Output only changes when the selected gate is high
        const GATED = 0x02;
        /// Divide-by-2 square wave
        const PURE = 0x04;
        /// 5-bit / 9-bit polynomial instead of the 4-bit one
        const POLY_SELECT = 0x08;
        /// Both high bits: divider runs three times slower
        const DIV3 = Self::PURE.bits() | Self::POLY_SELECT.bits();
    }
}

/// The 16 AUDC waveform modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum AudioControl {
    /// Output held at the channel volume
    #[default]
    SetToOne = 0x00,
    /// 4-bit polynomial
    Poly4 = 0x01,
    /// 4-bit polynomial gated by div-31
    Div31Poly4 = 0x02,
    /// 4-bit polynomial gated by 5-bit polynomial
    Poly5Poly4 = 0x03,
    /// Pure tone, divide by 2
    Pure = 0x04,
    /// Pure tone, divide by 2 (duplicate encoding)
    Pure2 = 0x05,
    /// Pure tone gated by div-31
    Div31Pure = 0x06,
    /// Pure tone gated by 5-bit polynomial
    Poly5Div2 = 0x07,
    /// 9-bit polynomial (white noise)
    Poly9 = 0x08,
    /// 5-bit polynomial
    Poly5 = 0x09,
    /// 5-bit polynomial gated by div-31
    Div31Poly5 = 0x0A,
    /// 5-bit polynomial gated by itself
    Poly5Poly5 = 0x0B,
    /// Pure tone, divide by 6
    Div3Pure = 0x0C,
    /// Pure tone, divide by 6 (duplicate encoding)
    Div3Pure2 = 0x0D,
    /// Pure tone, divide by 93
    Div93Pure = 0x0E,
    /// Pure tone gated by 5-bit polynomial, divider at 1/3
    Div3Poly5 = 0x0F,
}

/// Condition checked on each divider underflow before the output may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Every underflow
    Always,
    /// Only when the div-31 pulse is high
    Div31,
    /// Only when the 5-bit polynomial is high
    Poly5,
}

/// Generator that produces the next output level once the gate passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// No periodic behavior (SET_TO_1)
    Constant,
    /// Toggle between 0 and the volume
    Toggle,
    /// Advance and sample the 4-bit polynomial
    Poly4,
    /// Sample the 5-bit polynomial at its current position
    Poly5,
    /// Advance and sample the 9-bit polynomial
    Poly9,
}

/// Resolved behavior of one control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waveform {
    /// Gate for output updates
    pub gate: Gate,
    /// Output generator
    pub output: Output,
    /// Divider multiplied by three
    pub div3: bool,
}

const fn wf(gate: Gate, output: Output, div3: bool) -> Waveform {
    Waveform { gate, output, div3 }
}

/// Mode → behavior, indexed by the AUDC nibble
#[rustfmt::skip]
const WAVEFORMS: [Waveform; 16] = [
    wf(Gate::Always, Output::Constant, false), // 0x0 SET_TO_1
    wf(Gate::Always, Output::Poly4,    false), // 0x1 POLY4
    wf(Gate::Div31,  Output::Poly4,    false), // 0x2 DIV31_POLY4
    wf(Gate::Poly5,  Output::Poly4,    false), // 0x3 POLY5_POLY4
    wf(Gate::Always, Output::Toggle,   false), // 0x4 PURE
    wf(Gate::Always, Output::Toggle,   false), // 0x5 PURE2
    wf(Gate::Div31,  Output::Toggle,   false), // 0x6 DIV31_PURE
    wf(Gate::Poly5,  Output::Toggle,   false), // 0x7 POLY5_2
    wf(Gate::Always, Output::Poly9,    false), // 0x8 POLY9
    wf(Gate::Always, Output::Poly5,    false), // 0x9 POLY5
    wf(Gate::Div31,  Output::Poly5,    false), // 0xA DIV31_POLY5
    wf(Gate::Poly5,  Output::Poly5,    false), // 0xB POLY5_POLY5
    wf(Gate::Always, Output::Toggle,   true),  // 0xC DIV3_PURE
    wf(Gate::Always, Output::Toggle,   true),  // 0xD DIV3_PURE2
    wf(Gate::Div31,  Output::Toggle,   true),  // 0xE DIV93_PURE
    wf(Gate::Poly5,  Output::Toggle,   true),  // 0xF DIV3_POLY5
];

impl AudioControl {
    /// Decode an AUDC write (upper bits ignored)
    pub fn from_register(value: u8) -> Self {
        AudioControl::from_u8(value & AUDC_MASK).unwrap_or_default()
    }

    /// Raw nibble value
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Bit view of the mode
    #[inline]
    pub fn bits(self) -> ControlBits {
        ControlBits::from_bits_truncate(self.value())
    }

    /// Behavior of this mode
    #[inline]
    pub fn waveform(self) -> Waveform {
        WAVEFORMS[self as usize]
    }

    /// Whether the divider runs at one third speed
    #[inline]
    pub fn is_div3(self) -> bool {
        self.waveform().div3
    }
}
