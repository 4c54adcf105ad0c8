//! Sentence error types and sensor error codes.

use thiserror::Error;

/// Errors that can occur while decomposing an ASCII sentence.
///
/// These never escape the crate: a sentence that fails to decompose is
/// reported as [`AsciiResponse::Unrecognized`](crate::AsciiResponse::Unrecognized)
/// instead, since the checksum already passed upstream and the bytes are
/// worth surfacing to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SentenceError {
    /// Sentence does not carry the `$VN...*XX` framing.
    #[error("malformed sentence framing")]
    MalformedFraming,

    /// Sentence is not valid UTF-8.
    #[error("invalid UTF-8 in sentence")]
    InvalidUtf8,

    /// Sentence is missing a required parameter.
    #[error("missing parameter {index} in {tag} sentence")]
    MissingParameter {
        /// Sentence tag (e.g. `RRG`).
        tag: String,
        /// Zero-based parameter index.
        index: usize,
    },

    /// A numeric parameter failed to parse.
    #[error("invalid numeric parameter: {0}")]
    InvalidNumber(String),
}

/// Error codes reported by the sensor in `$VNERR` sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorErrorCode {
    /// Processor hard fault.
    HardFault,
    /// Serial receive buffer overflowed.
    SerialBufferOverflow,
    /// Command checksum did not validate.
    InvalidChecksum,
    /// Command not recognized.
    InvalidCommand,
    /// Too few parameters for the command.
    NotEnoughParameters,
    /// Too many parameters for the command.
    TooManyParameters,
    /// A parameter was out of range.
    InvalidParameter,
    /// Register ID not recognized.
    InvalidRegister,
    /// Register is not writable.
    UnauthorizedAccess,
    /// Watchdog caused a reset.
    WatchdogReset,
    /// Output buffer overflowed.
    OutputBufferOverflow,
    /// Baud rate too low for the configured outputs.
    InsufficientBaudRate,
    /// Internal error buffer overflowed.
    ErrorBufferOverflow,
    /// Unknown error code.
    Unknown(u8),
}

impl std::fmt::Display for SensorErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorErrorCode::HardFault => write!(f, "hard fault"),
            SensorErrorCode::SerialBufferOverflow => write!(f, "serial buffer overflow"),
            SensorErrorCode::InvalidChecksum => write!(f, "invalid checksum"),
            SensorErrorCode::InvalidCommand => write!(f, "invalid command"),
            SensorErrorCode::NotEnoughParameters => write!(f, "not enough parameters"),
            SensorErrorCode::TooManyParameters => write!(f, "too many parameters"),
            SensorErrorCode::InvalidParameter => write!(f, "invalid parameter"),
            SensorErrorCode::InvalidRegister => write!(f, "invalid register"),
            SensorErrorCode::UnauthorizedAccess => write!(f, "unauthorized access"),
            SensorErrorCode::WatchdogReset => write!(f, "watchdog reset"),
            SensorErrorCode::OutputBufferOverflow => write!(f, "output buffer overflow"),
            SensorErrorCode::InsufficientBaudRate => write!(f, "insufficient baud rate"),
            SensorErrorCode::ErrorBufferOverflow => write!(f, "error buffer overflow"),
            SensorErrorCode::Unknown(code) => write!(f, "unknown error ({})", code),
        }
    }
}

impl From<u8> for SensorErrorCode {
    fn from(code: u8) -> Self {
        match code {
            1 => SensorErrorCode::HardFault,
            2 => SensorErrorCode::SerialBufferOverflow,
            3 => SensorErrorCode::InvalidChecksum,
            4 => SensorErrorCode::InvalidCommand,
            5 => SensorErrorCode::NotEnoughParameters,
            6 => SensorErrorCode::TooManyParameters,
            7 => SensorErrorCode::InvalidParameter,
            8 => SensorErrorCode::InvalidRegister,
            9 => SensorErrorCode::UnauthorizedAccess,
            10 => SensorErrorCode::WatchdogReset,
            11 => SensorErrorCode::OutputBufferOverflow,
            12 => SensorErrorCode::InsufficientBaudRate,
            255 => SensorErrorCode::ErrorBufferOverflow,
            _ => SensorErrorCode::Unknown(code),
        }
    }
}

impl From<SensorErrorCode> for u8 {
    fn from(code: SensorErrorCode) -> Self {
        match code {
            SensorErrorCode::HardFault => 1,
            SensorErrorCode::SerialBufferOverflow => 2,
            SensorErrorCode::InvalidChecksum => 3,
            SensorErrorCode::InvalidCommand => 4,
            SensorErrorCode::NotEnoughParameters => 5,
            SensorErrorCode::TooManyParameters => 6,
            SensorErrorCode::InvalidParameter => 7,
            SensorErrorCode::InvalidRegister => 8,
            SensorErrorCode::UnauthorizedAccess => 9,
            SensorErrorCode::WatchdogReset => 10,
            SensorErrorCode::OutputBufferOverflow => 11,
            SensorErrorCode::InsufficientBaudRate => 12,
            SensorErrorCode::ErrorBufferOverflow => 255,
            SensorErrorCode::Unknown(code) => code,
        }
    }
}
