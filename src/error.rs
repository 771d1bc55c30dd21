//! Unified error types for the RoomSense firmware.
//!
//! Sensor decode failures are recoverable per tick and carried as
//! [`DecodeError`]; everything that can stop the node from booting
//! (bad configuration, peripheral init) funnels into [`Error`].
//! All variants are `Copy` so they can travel through events and the
//! sensor snapshot without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Single-wire decode errors
// ---------------------------------------------------------------------------

/// Which edge wait of a single-wire transaction ran out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePhase {
    /// Sensor never pulled the line low after the start signal.
    ResponseLow,
    /// Sensor never released the line after its low acknowledge.
    ResponseHigh,
    /// Sensor never pulled low to start the first data bit.
    DataPreamble,
    /// Rising edge of data bit `n` (0-based) never arrived.
    BitStart(u8),
    /// Falling edge of data bit `n` (0-based) never arrived.
    BitEnd(u8),
}

impl fmt::Display for LinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResponseLow => write!(f, "response low"),
            Self::ResponseHigh => write!(f, "response high"),
            Self::DataPreamble => write!(f, "data preamble"),
            Self::BitStart(n) => write!(f, "bit {n} start"),
            Self::BitEnd(n) => write!(f, "bit {n} end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// An edge wait exceeded its iteration budget.
    Timeout { phase: LinePhase },
    /// All 40 bits arrived but the trailing checksum byte disagrees.
    ChecksumMismatch { expected: u8, received: u8 },
    /// The GPIO driver reported an error while driving or sampling the line.
    Line,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { phase } => write!(f, "timeout waiting for {phase}"),
            Self::ChecksumMismatch { expected, received } => write!(
                f,
                "checksum mismatch (expected 0x{expected:02X}, received 0x{received:02X})"
            ),
            Self::Line => write!(f, "GPIO line error"),
        }
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
