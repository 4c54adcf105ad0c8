//! Schema-store interface and frame layout descriptions.
//!
//! The decoder does not know what any binary output register contains; it
//! asks a [`SchemaStore`] to map the header it found on the wire to a
//! payload layout, and hands validated ASCII sentences over for field
//! decomposition. The store is a trait so tests can swap in a double and so
//! the decoder stays decoupled from any particular register database.

use crate::constants::{BINARY_HEADER_PREFIX, FIELD_WORD_LEN};
use crate::error::DecodeError;

/// Lookup key built from a binary frame header: the group-enable byte and
/// one little-endian field-enable word per enabled group.
///
/// Built fresh for every scan attempt and never persisted by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderDescriptor {
    /// Group-enable bitmask.
    pub group_enable: u8,
    /// Field-enable word for each enabled group, in group-bit order.
    pub field_enable: Vec<u16>,
}

impl HeaderDescriptor {
    /// Create a descriptor from its parts.
    pub fn new(group_enable: u8, field_enable: Vec<u16>) -> Self {
        HeaderDescriptor {
            group_enable,
            field_enable,
        }
    }

    /// Number of enabled groups.
    pub fn group_count(&self) -> usize {
        self.field_enable.len()
    }

    /// On-wire length of the header this descriptor was read from,
    /// including the sync byte: `1 + 1 + 2g`.
    pub fn header_len(&self) -> usize {
        BINARY_HEADER_PREFIX + FIELD_WORD_LEN * self.field_enable.len()
    }
}

/// Measurement unit attached to a decoded variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Angle in degrees.
    Degrees,
    /// Angular rate in radians per second.
    RadiansPerSecond,
    /// Velocity in meters per second.
    MetersPerSecond,
    /// Acceleration in meters per second squared.
    MetersPerSecondSquared,
    /// Magnetic field in Gauss.
    Gauss,
    /// Temperature in degrees Celsius.
    Celsius,
    /// Pressure in kilopascals.
    Kilopascals,
    /// Time interval in seconds.
    Seconds,
    /// Dimensionless quantity.
    None,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Unit::Degrees => "deg",
            Unit::RadiansPerSecond => "rad/s",
            Unit::MetersPerSecond => "m/s",
            Unit::MetersPerSecondSquared => "m/s^2",
            Unit::Gauss => "G",
            Unit::Celsius => "degC",
            Unit::Kilopascals => "kPa",
            Unit::Seconds => "s",
            Unit::None => "-",
        };
        write!(f, "{}", text)
    }
}

/// A decoded payload value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 32-bit IEEE-754 float.
    F32(f32),
}

impl Value {
    /// The value as an `f32`, if it is one.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(v) => Some(*v),
        }
    }
}

/// Numeric encoding of one payload field.
///
/// A closed set of variant decoders: new wire encodings are added as
/// variants here without touching the payload walking logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Little-endian 32-bit IEEE-754 float.
    Float32Le,
}

impl Encoding {
    /// Bytes this encoding consumes from the payload.
    pub fn byte_len(&self) -> usize {
        match self {
            Encoding::Float32Le => 4,
        }
    }

    /// Decode one value from exactly `byte_len()` bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        match self {
            Encoding::Float32Le => {
                let raw: [u8; 4] =
                    bytes
                        .try_into()
                        .map_err(|_| DecodeError::ValueWidthMismatch {
                            expected: 4,
                            actual: bytes.len(),
                        })?;
                Ok(Value::F32(f32::from_le_bytes(raw)))
            }
        }
    }
}

/// Layout of one variable inside a binary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Output group the variable belongs to (e.g. `"common"`).
    pub group: &'static str,
    /// Output field within the group (e.g. `"YawPitchRoll"`).
    pub field: &'static str,
    /// Name of the individual variable (e.g. `"yaw"`).
    pub variable: &'static str,
    /// Width of the variable on the wire, in bits.
    pub bits: u16,
    /// Numeric encoding of the variable.
    pub encoding: Encoding,
    /// Measurement unit of the decoded value.
    pub unit: Unit,
}

/// Payload description for one registered header descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    /// Declared payload length in bytes.
    pub payload_len: usize,
    /// Variables in wire order.
    pub fields: Vec<FieldSpec>,
}

impl FrameLayout {
    /// Build a layout from an ordered field list, deriving the payload
    /// length from the field widths.
    pub fn from_fields(fields: Vec<FieldSpec>) -> Self {
        let payload_len = fields.iter().map(|f| usize::from(f.bits) / 8).sum();
        FrameLayout {
            payload_len,
            fields,
        }
    }
}

/// External capability mapping wire headers and sentences to structure.
///
/// `lookup_binary` answers "is this a real frame header, and if so what
/// does its payload contain"; a `None` means the header is not registered
/// and the sync byte was incidental payload data. `decode_ascii` receives a
/// complete checksum-validated sentence (from `$` through the checksum
/// digits) and returns whatever field structure the store defines.
pub trait SchemaStore {
    /// Decomposed ASCII sentence type produced by this store.
    type Ascii;

    /// Look up the payload layout for a binary frame header.
    fn lookup_binary(&self, descriptor: &HeaderDescriptor) -> Option<&FrameLayout>;

    /// Decompose a validated ASCII sentence.
    fn decode_ascii(&self, sentence: &[u8]) -> Self::Ascii;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_len_scales_with_group_count() {
        for k in 1..=8 {
            let descriptor = HeaderDescriptor::new(0xFF, vec![0x0001; k]);
            assert_eq!(descriptor.header_len(), 1 + 1 + 2 * k);
        }
    }

    #[test]
    fn test_float32_le_decode() {
        let bytes = 1.5f32.to_le_bytes();
        let value = Encoding::Float32Le.decode(&bytes).unwrap();
        assert_eq!(value, Value::F32(1.5));
    }

    #[test]
    fn test_float32_le_rejects_short_slice() {
        let err = Encoding::Float32Le.decode(&[0x00, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ValueWidthMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_layout_payload_len_from_fields() {
        let spec = FieldSpec {
            group: "common",
            field: "YawPitchRoll",
            variable: "yaw",
            bits: 32,
            encoding: Encoding::Float32Le,
            unit: Unit::Degrees,
        };
        let layout = FrameLayout::from_fields(vec![spec; 3]);
        assert_eq!(layout.payload_len, 12);
    }
}
