//! NMEA-0183-style sentence protocol for the wind transducer
//!
//! This crate covers the byte-stream-to-reading path: line framing
//! over fragmented reads, sentence grammar and checksum validation,
//! tag-keyed dispatch, and the wind and barometric field decoders.

pub mod baro;
pub mod framer;
pub mod router;
pub mod sentence;
pub mod wind;

pub use baro::*;
pub use framer::*;
pub use router::*;
pub use sentence::*;
pub use wind::*;

use thiserror::Error;
use wst_core::UnitError;

/// Errors surfaced by the protocol layer. All of these are recoverable
/// noise on a serial link; the collector logs them and keeps reading.
#[derive(Debug, Error)]
pub enum NmeaError {
    #[error("Checksum mismatch: computed {computed:02X}, sentence says {expected:02X}")]
    ChecksumMismatch { computed: u8, expected: u8 },

    #[error("Framing buffer overflow, {0} bytes discarded")]
    FramingOverflow(usize),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors from turning sentence fields into engineering units
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid numeric field {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
