//! Decoded message model.

use std::collections::BTreeMap;

use crate::schema::{Unit, Value};

/// Which message family a decoded message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Compact binary telemetry frame.
    Binary,
    /// Human-readable ASCII sentence.
    Ascii,
}

/// One named, unit-tagged value decoded from a binary payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedVariable {
    /// Output group the variable came from.
    pub group: &'static str,
    /// Output field within the group.
    pub field: &'static str,
    /// Measurement unit.
    pub unit: Unit,
    /// Decoded value.
    pub value: Value,
}

/// A fully decoded binary telemetry frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinaryMessage {
    /// Decoded variables, keyed by variable name.
    pub variables: BTreeMap<&'static str, DecodedVariable>,
}

impl BinaryMessage {
    /// The value of a variable as `f32`, if present.
    pub fn value_f32(&self, variable: &str) -> Option<f32> {
        self.variables.get(variable)?.value.as_f32()
    }
}

/// A message extracted from the wire, ready for the output queue.
///
/// ASCII content is whatever structure the schema store produced; the
/// decoder treats it as opaque.
#[derive(Debug, Clone, PartialEq)]
pub enum Message<A> {
    /// Decoded binary telemetry frame.
    Binary(BinaryMessage),
    /// Decomposed ASCII sentence.
    Ascii(A),
}

impl<A> Message<A> {
    /// The message family.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Binary(_) => MessageKind::Binary,
            Message::Ascii(_) => MessageKind::Ascii,
        }
    }

    /// The binary content, if this is a binary message.
    pub fn as_binary(&self) -> Option<&BinaryMessage> {
        match self {
            Message::Binary(content) => Some(content),
            Message::Ascii(_) => None,
        }
    }

    /// The ASCII content, if this is an ASCII message.
    pub fn as_ascii(&self) -> Option<&A> {
        match self {
            Message::Binary(_) => None,
            Message::Ascii(content) => Some(content),
        }
    }
}
