//! Decoder error types.
//!
//! Scan-level outcomes (false sync, incomplete frame, checksum mismatch)
//! are ordinary control flow and never surface as errors; the variants here
//! cover genuine inconsistencies between a schema store's answers and the
//! bytes on the wire.

use thiserror::Error;

/// Errors raised while decoding a validated binary payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field's layout runs past the declared payload length.
    #[error("field '{variable}' needs {needed} payload bytes, only {available} available")]
    PayloadTooShort {
        /// Variable whose decode overran.
        variable: &'static str,
        /// Bytes the field required.
        needed: usize,
        /// Bytes left in the payload.
        available: usize,
    },

    /// An encoding was handed a slice of the wrong width.
    #[error("value width mismatch: expected {expected} bytes, got {actual}")]
    ValueWidthMismatch {
        /// Width the encoding consumes.
        expected: usize,
        /// Width actually provided.
        actual: usize,
    },
}
