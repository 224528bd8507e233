//! TIA Sound Emulator for the Atari 2600
//!
//! A register-accurate emulator of the audio section of the Atari Television
//! Interface Adapter. Feed it register writes as the emulated CPU issues them
//! and pull 8-bit unsigned samples at the host rate.
//!
//! # Features
//! - Both audio channels with all 16 AUDC waveform modes
//! - 4-, 5- and 9-bit polynomial counters and the div-31 gate
//! - Div-by-3 divider modes
//! - Integer-only resampling from the native audio clock (≈31.4 kHz)
//! - Serializable chip state for save-states
//! - Optional lock-protected handle for multi-threaded hosts
//!
//! # Crate feature flags
//! - `emulator` (default): Core TIA sound emulator (`tia`)
//!
//! # Quick start
//! ```
//! use tia_sound::tia::{AUDC0, AUDF0, AUDV0};
//! use tia_sound::{TiaConfig, TiaSound};
//!
//! let mut chip = TiaSound::with_config(&TiaConfig::ntsc(22_050)).unwrap();
//! chip.update(AUDF0, 0x1F); // Frequency divisor
//! chip.update(AUDV0, 0x0F); // Volume
//! chip.update(AUDC0, 0x04); // Pure tone
//!
//! let mut buffer = [0u8; 512];
//! chip.fill_buffer(&mut buffer);
//! ```

#![warn(missing_docs)]

pub mod config; // Sample Rate Configuration
pub mod shared; // Thread-Shared Handle
pub mod tia; // TIA Sound Emulation (core)

/// Error types for TIA sound emulator operations
#[derive(thiserror::Error, Debug)]
pub enum TiaSoundError {
    /// Sample rates the chip cannot run at
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error while parsing a configuration document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, TiaSoundError>;

// Public API exports
pub use config::TiaConfig;
pub use shared::SharedTiaSound;
pub use tia::{AudioControl, Register, TiaSound};
