//! TIA audio constants
//!
//! Register addresses, polynomial periods, reference clocks and the
//! fixed-point scale used by the resampling accumulator.

/// Number of audio channels on the TIA
pub const CHANNEL_COUNT: usize = 2;

/// Audio control register, channel 0
pub const AUDC0: u16 = 0x15;
/// Audio control register, channel 1
pub const AUDC1: u16 = 0x16;
/// Audio frequency register, channel 0
pub const AUDF0: u16 = 0x17;
/// Audio frequency register, channel 1
pub const AUDF1: u16 = 0x18;
/// Audio volume register, channel 0
pub const AUDV0: u16 = 0x19;
/// Audio volume register, channel 1
pub const AUDV1: u16 = 0x1A;

/// Control register mask (4 bits)
pub const AUDC_MASK: u8 = 0x0F;
/// Frequency register mask (5 bits)
pub const AUDF_MASK: u8 = 0x1F;
/// Volume register mask (4 bits)
pub const AUDV_MASK: u8 = 0x0F;
/// Volume is stored left-shifted so two channels sum within 8 bits (15 << 3 = 120)
pub const VOLUME_SHIFT: u8 = 3;
/// Largest per-channel output level
pub const MAX_VOLUME: u8 = AUDV_MASK << VOLUME_SHIFT;

/// Period of the 4-bit polynomial
pub const POLY4_SIZE: usize = 0x000F;
/// Period of the 5-bit polynomial (and the div-31 gate)
pub const POLY5_SIZE: usize = 0x001F;
/// Period of the 9-bit polynomial
pub const POLY9_SIZE: usize = 0x01FF;

/// Divider multiplier for the div-by-3 control modes
pub const DIV3_MULTIPLIER: u8 = 3;
/// Longest divider: (AUDF 31 + 1) * 3
pub const MAX_DIVIDER: u8 = (AUDF_MASK + 1) * DIV3_MULTIPLIER;

/// Fractional bits of the resampling accumulator
pub const FIXED_POINT_BITS: u32 = 8;
/// Weight of one native tick in accumulator units (1.0 in 8.8 fixed point)
pub const FIXED_POINT_ONE: u32 = 1 << FIXED_POINT_BITS;

/// NTSC native audio clock: 3.579545 MHz color clock / 114
pub const NTSC_AUDIO_CLOCK_HZ: u32 = 31_400;
/// PAL native audio clock: 3.546894 MHz color clock / 114
pub const PAL_AUDIO_CLOCK_HZ: u32 = 31_113;
