//! Protocol constants
//!
//! These constants define the frame markers, checksum widths, and buffer
//! limits used by the VN-100 serial protocol decoder. All of them are
//! overridable through [`DecoderConfig`](crate::DecoderConfig); the values
//! here are the sensor's defaults.

// ============================================================================
// Frame Markers
// ============================================================================

/// Sync byte identifying the start of a binary output frame.
pub const SYNC_BYTE: u8 = 0xFA;

/// Start token of an ASCII sentence (`$` followed by the `VN` tag).
pub const ASCII_START_TOKEN: [u8; 3] = *b"$VN";

/// Terminator byte separating an ASCII sentence body from its checksum.
pub const ASCII_TERMINATOR: u8 = b'*';

/// Number of hex digits rendering the ASCII checksum after the terminator.
pub const CHECKSUM_DIGITS: usize = 2;

// ============================================================================
// Buffer Limits
// ============================================================================

/// Upper bound on a binary frame's total length, in bytes.
///
/// Sync byte + group byte + 3 field words + the largest group payloads the
/// sensor can be configured to emit stay well inside this.
pub const BINARY_MAX_LEN: usize = 256;

/// Upper bound on a frame's length while the sensor is resetting.
///
/// During a reset only short ASCII command responses are expected, so the
/// janitor can reclaim scanned bytes much sooner.
pub const RESET_MAX_LEN: usize = 128;

/// Hard memory cap multiplier: the input buffer never holds more than
/// `OVERFLOW_RATIO * BINARY_MAX_LEN` bytes.
pub const OVERFLOW_RATIO: usize = 8;

// ============================================================================
// Binary Header
// ============================================================================

/// Bytes of binary header before the field-enable words (sync + group byte).
pub const BINARY_HEADER_PREFIX: usize = 2;

/// Width of one field-enable word in the binary header.
pub const FIELD_WORD_LEN: usize = 2;

/// Width of the CRC trailer on a binary frame.
pub const CRC_LEN: usize = 2;
