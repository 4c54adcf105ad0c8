//! ASCII sentence decomposition.
//!
//! Sentences arrive here already checksum-validated, as the full byte run
//! from `$` through the two checksum digits. Decomposition classifies the
//! sentence by its tag (the letters after `$VN`) and splits out the
//! comma-separated parameters. Register reads and writes echo the register
//! ID; asynchronous outputs carry their measurement values as text.

use crate::error::{SensorErrorCode, SentenceError};

/// A decomposed ASCII sentence from the sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsciiResponse {
    /// `$VNRRG`: register read response.
    ReadRegister {
        /// Register ID that was read.
        register: u8,
        /// Register contents, one string per comma-separated parameter.
        args: Vec<String>,
    },
    /// `$VNWRG`: register write confirmation.
    WriteRegister {
        /// Register ID that was written.
        register: u8,
        /// Echoed register contents.
        args: Vec<String>,
    },
    /// `$VNWNV`: settings written to non-volatile memory.
    WriteSettings,
    /// `$VNRFS`: factory settings restored.
    RestoreFactorySettings,
    /// `$VNTAR`: tare confirmation.
    Tare,
    /// `$VNRST`: reset confirmation.
    Reset,
    /// `$VNERR`: sensor error report.
    Error(SensorErrorCode),
    /// Asynchronous measurement output (e.g. `$VNYPR`).
    AsyncOutput {
        /// Output tag (e.g. `YPR`).
        output: String,
        /// Measurement values as text, in sentence order.
        values: Vec<String>,
    },
    /// Sentence that validated but did not match any known shape.
    Unrecognized {
        /// The full sentence as received.
        sentence: String,
    },
}

/// Decompose a checksum-validated sentence.
///
/// Total: framing or parameter problems come back as
/// [`AsciiResponse::Unrecognized`] rather than an error, since the bytes
/// already passed the checksum and the caller may still want them.
pub fn decode_sentence(sentence: &[u8]) -> AsciiResponse {
    match parse_sentence(sentence) {
        Ok(response) => response,
        Err(_) => AsciiResponse::Unrecognized {
            sentence: String::from_utf8_lossy(sentence).into_owned(),
        },
    }
}

fn parse_sentence(sentence: &[u8]) -> Result<AsciiResponse, SentenceError> {
    let text = std::str::from_utf8(sentence).map_err(|_| SentenceError::InvalidUtf8)?;
    let body = text
        .strip_prefix("$VN")
        .ok_or(SentenceError::MalformedFraming)?;
    let body = match body.rfind('*') {
        Some(star) => &body[..star],
        None => return Err(SentenceError::MalformedFraming),
    };

    let mut parts = body.split(',');
    let tag = parts.next().unwrap_or("");
    let params: Vec<&str> = parts.collect();

    let response = match tag {
        "RRG" => {
            let register = register_param(tag, &params)?;
            AsciiResponse::ReadRegister {
                register,
                args: params[1..].iter().map(|p| p.to_string()).collect(),
            }
        }
        "WRG" => {
            let register = register_param(tag, &params)?;
            AsciiResponse::WriteRegister {
                register,
                args: params[1..].iter().map(|p| p.to_string()).collect(),
            }
        }
        "WNV" => AsciiResponse::WriteSettings,
        "RFS" => AsciiResponse::RestoreFactorySettings,
        "TAR" => AsciiResponse::Tare,
        "RST" => AsciiResponse::Reset,
        "ERR" => {
            let code = params
                .first()
                .ok_or_else(|| SentenceError::MissingParameter {
                    tag: tag.to_string(),
                    index: 0,
                })?;
            let code: u8 = code
                .parse()
                .map_err(|_| SentenceError::InvalidNumber(code.to_string()))?;
            AsciiResponse::Error(SensorErrorCode::from(code))
        }
        _ => AsciiResponse::AsyncOutput {
            output: tag.to_string(),
            values: params.iter().map(|p| p.to_string()).collect(),
        },
    };
    Ok(response)
}

fn register_param(tag: &str, params: &[&str]) -> Result<u8, SentenceError> {
    let register = params
        .first()
        .ok_or_else(|| SentenceError::MissingParameter {
            tag: tag.to_string(),
            index: 0,
        })?;
    register
        .parse()
        .map_err(|_| SentenceError::InvalidNumber(register.to_string()))
}
