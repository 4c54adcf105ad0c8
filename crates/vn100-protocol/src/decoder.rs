//! Streaming decoder: janitor, package scanner, and output queue.
//!
//! The caller drives a poll loop: append newly received bytes with
//! [`Decoder::feed`], call [`Decoder::parse`] until it returns `false`, and
//! drain the output queue. Each `parse` call first runs the buffer janitor,
//! then extracts at most one complete message. "Waiting for more data" is a
//! plain `false` return; nothing ever blocks or panics.

use std::collections::VecDeque;

use crate::buffer::{InputBuffer, ScanStatus};
use crate::checksum::{crc16_verify, xor_verify};
use crate::constants::{
    ASCII_START_TOKEN, ASCII_TERMINATOR, BINARY_HEADER_PREFIX, BINARY_MAX_LEN, CHECKSUM_DIGITS,
    CRC_LEN, FIELD_WORD_LEN, OVERFLOW_RATIO, RESET_MAX_LEN, SYNC_BYTE,
};
use crate::error::DecodeError;
use crate::message::{BinaryMessage, DecodedVariable, Message};
use crate::schema::{FrameLayout, HeaderDescriptor, SchemaStore};

/// Tunable wire-format and buffering parameters.
///
/// Defaults mirror the constants module; tests and nonstandard deployments
/// can override individual fields.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Binary frame sync byte.
    pub sync_byte: u8,
    /// ASCII sentence start token.
    pub ascii_start: [u8; 3],
    /// ASCII sentence terminator.
    pub ascii_terminator: u8,
    /// Hex digits following the terminator.
    pub checksum_digits: usize,
    /// Longest possible binary frame.
    pub binary_max_len: usize,
    /// Longest possible frame while in reset mode.
    pub reset_max_len: usize,
    /// Hard buffer cap, as a multiple of `binary_max_len`.
    pub overflow_ratio: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            sync_byte: SYNC_BYTE,
            ascii_start: ASCII_START_TOKEN,
            ascii_terminator: ASCII_TERMINATOR,
            checksum_digits: CHECKSUM_DIGITS,
            binary_max_len: BINARY_MAX_LEN,
            reset_max_len: RESET_MAX_LEN,
            overflow_ratio: OVERFLOW_RATIO,
        }
    }
}

/// Outcome of attempting one message family at one buffer position.
enum Attempt<M> {
    /// A frame was validated, spliced out, and decoded.
    Complete(M),
    /// Not a frame here; keep scanning from the next position.
    Skip,
    /// Cannot decide yet (or a confirmed frame failed its CRC); give up on
    /// this call and wait for more input.
    Halt,
}

/// Streaming protocol decoder for one serial channel.
///
/// Generic over the [`SchemaStore`] that describes binary payloads and
/// decomposes ASCII sentences.
pub struct Decoder<S: SchemaStore> {
    store: S,
    config: DecoderConfig,
    buffer: InputBuffer,
    output: VecDeque<Message<S::Ascii>>,
    reset_mode: bool,
}

impl<S: SchemaStore> Decoder<S> {
    /// Create a decoder with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, DecoderConfig::default())
    }

    /// Create a decoder with a custom configuration.
    pub fn with_config(store: S, config: DecoderConfig) -> Self {
        Decoder {
            store,
            config,
            buffer: InputBuffer::new(),
            output: VecDeque::new(),
            reset_mode: false,
        }
    }

    /// Append raw transport bytes to the input buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Run the janitor, then try to extract one complete message.
    ///
    /// Returns `true` if a message was appended to the output queue. Call
    /// repeatedly until `false` to drain a burst of input; calling again
    /// before popping queued messages is always allowed.
    pub fn parse(&mut self) -> bool {
        self.buffer.clean(self.reset_mode, &self.config);
        match self.scan() {
            Some(message) => {
                self.output.push_back(message);
                true
            }
            None => false,
        }
    }

    /// Pop the oldest decoded message, if any.
    pub fn pop_message(&mut self) -> Option<Message<S::Ascii>> {
        self.output.pop_front()
    }

    /// Take every queued message, oldest first.
    pub fn drain_messages(&mut self) -> Vec<Message<S::Ascii>> {
        self.output.drain(..).collect()
    }

    /// Number of messages waiting in the output queue.
    pub fn pending_messages(&self) -> usize {
        self.output.len()
    }

    /// Number of bytes currently buffered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// The buffered bytes, for inspection.
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Enter or leave reset mode. While set, binary scanning is disabled
    /// and the janitor assumes short ASCII frames only.
    pub fn set_reset_mode(&mut self, reset_mode: bool) {
        self.reset_mode = reset_mode;
    }

    /// Whether reset mode is active.
    pub fn reset_mode(&self) -> bool {
        self.reset_mode
    }

    /// Drop all buffered bytes and queued messages.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.output.clear();
    }

    /// Access the schema store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Walk the buffer left to right, extracting at most one message.
    fn scan(&mut self) -> Option<Message<S::Ascii>> {
        let mut pos = 0;
        while pos < self.buffer.len() {
            if !self.reset_mode && self.buffer.byte(pos) == self.config.sync_byte {
                match self.try_binary(pos) {
                    Attempt::Complete(message) => return Some(message),
                    // False sync: the byte was incidental payload data.
                    Attempt::Skip => {
                        pos += 1;
                        continue;
                    }
                    Attempt::Halt => return None,
                }
            }
            match self.try_ascii(pos) {
                Attempt::Complete(message) => return Some(message),
                Attempt::Skip => pos += 1,
                Attempt::Halt => return None,
            }
        }
        None
    }

    /// Attempt to frame, validate, and decode a binary frame at `pos`.
    fn try_binary(&mut self, pos: usize) -> Attempt<Message<S::Ascii>> {
        self.buffer.set_status(pos, ScanStatus::BinaryChecked);
        let len = self.buffer.len();

        // Group-enable byte.
        if len < pos + BINARY_HEADER_PREFIX {
            return Attempt::Halt;
        }
        let group_enable = self.buffer.byte(pos + 1);
        let group_count = group_enable.count_ones() as usize;

        // One field-enable word per enabled group.
        let header_len = BINARY_HEADER_PREFIX + FIELD_WORD_LEN * group_count;
        if len < pos + header_len {
            return Attempt::Halt;
        }
        let mut field_enable = Vec::with_capacity(group_count);
        for i in 0..group_count {
            let at = pos + BINARY_HEADER_PREFIX + FIELD_WORD_LEN * i;
            field_enable.push(u16::from_le_bytes([
                self.buffer.byte(at),
                self.buffer.byte(at + 1),
            ]));
        }
        let descriptor = HeaderDescriptor::new(group_enable, field_enable);

        let Some(layout) = self.store.lookup_binary(&descriptor) else {
            log::debug!(
                "scanner: unrecognized binary header {:?} at offset {}, treating as false sync",
                descriptor,
                pos
            );
            return Attempt::Skip;
        };

        let total_len = header_len + layout.payload_len + CRC_LEN;
        if len < pos + total_len {
            // Length confirmed but payload still in flight.
            return Attempt::Halt;
        }

        let frame = &self.buffer.as_slice()[pos..pos + total_len];
        if !crc16_verify(frame) {
            // The frame's bytes stay in place; the same candidate will be
            // reconsidered next call. See DESIGN.md on this halt.
            log::warn!(
                "scanner: CRC mismatch on {}-byte binary frame at offset {}",
                total_len,
                pos
            );
            return Attempt::Halt;
        }

        let payload = &frame[header_len..total_len - CRC_LEN];
        let content = match decode_payload(layout, payload) {
            Ok(content) => content,
            Err(err) => {
                // Schema layout disagrees with its own declared payload
                // length. Treat like an unrecognized header so scanning
                // keeps making progress.
                log::warn!("scanner: payload decode failed: {}", err);
                return Attempt::Skip;
            }
        };

        let _ = self.buffer.splice(pos, total_len);
        log::trace!(
            "scanner: consumed {}-byte binary frame at offset {}",
            total_len,
            pos
        );
        Attempt::Complete(Message::Binary(content))
    }

    /// Attempt to frame, validate, and decompose an ASCII sentence at `pos`.
    fn try_ascii(&mut self, pos: usize) -> Attempt<Message<S::Ascii>> {
        let len = self.buffer.len();
        let token = self.config.ascii_start;

        if self.buffer.byte(pos) != token[0] {
            self.buffer.set_status(pos, ScanStatus::AllChecked);
            return Attempt::Skip;
        }
        // A '$' near the tail may be a sentence still arriving.
        if len < pos + token.len() {
            return Attempt::Halt;
        }
        if self.buffer.as_slice()[pos..pos + token.len()] != token {
            self.buffer.set_status(pos, ScanStatus::AllChecked);
            return Attempt::Skip;
        }
        self.buffer.set_status(pos, ScanStatus::AllChecked);

        let Some(star) = self.buffer.as_slice()[pos + token.len()..]
            .iter()
            .position(|&b| b == self.config.ascii_terminator)
            .map(|offset| pos + token.len() + offset)
        else {
            return Attempt::Halt;
        };

        let end = star + 1 + self.config.checksum_digits;
        if len < end {
            return Attempt::Halt;
        }

        let bytes = self.buffer.as_slice();
        let body = &bytes[pos + 1..star];
        let digits = &bytes[star + 1..end];
        if !xor_verify(body, digits) {
            // Corrupted sentence: leave it for the janitor, keep scanning.
            log::debug!(
                "scanner: ASCII checksum mismatch at offset {}, skipping candidate",
                pos
            );
            return Attempt::Skip;
        }

        let sentence = self.buffer.splice(pos, end - pos);
        log::trace!(
            "scanner: consumed {}-byte ASCII sentence at offset {}",
            sentence.len(),
            pos
        );
        Attempt::Complete(Message::Ascii(self.store.decode_ascii(&sentence)))
    }
}

/// Decode a validated payload by walking the layout's field list in order.
fn decode_payload(layout: &FrameLayout, payload: &[u8]) -> Result<BinaryMessage, DecodeError> {
    let mut message = BinaryMessage::default();
    let mut cursor = 0;
    for spec in &layout.fields {
        let width = usize::from(spec.bits) / 8;
        let available = payload.len().saturating_sub(cursor);
        if available < width {
            return Err(DecodeError::PayloadTooShort {
                variable: spec.variable,
                needed: width,
                available,
            });
        }
        let value = spec.encoding.decode(&payload[cursor..cursor + width])?;
        cursor += width;
        message.variables.insert(
            spec.variable,
            DecodedVariable {
                group: spec.group,
                field: spec.field,
                unit: spec.unit,
                value,
            },
        );
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::crc16_ccitt;
    use crate::message::MessageKind;
    use crate::schema::{Encoding, FieldSpec, Unit};
    use std::collections::HashMap;

    /// Minimal schema-store double: a handful of registered layouts plus
    /// pass-through ASCII decomposition.
    struct TestStore {
        layouts: HashMap<HeaderDescriptor, FrameLayout>,
    }

    impl TestStore {
        fn new() -> Self {
            TestStore {
                layouts: HashMap::new(),
            }
        }

        /// Register a single-group layout of identical float fields.
        fn with_floats(mut self, field_word: u16, names: &[&'static str]) -> Self {
            let fields = names
                .iter()
                .map(|&variable| FieldSpec {
                    group: "test",
                    field: "Floats",
                    variable,
                    bits: 32,
                    encoding: Encoding::Float32Le,
                    unit: Unit::None,
                })
                .collect();
            self.layouts.insert(
                HeaderDescriptor::new(0x01, vec![field_word]),
                FrameLayout::from_fields(fields),
            );
            self
        }
    }

    impl SchemaStore for TestStore {
        type Ascii = String;

        fn lookup_binary(&self, descriptor: &HeaderDescriptor) -> Option<&FrameLayout> {
            self.layouts.get(descriptor)
        }

        fn decode_ascii(&self, sentence: &[u8]) -> String {
            String::from_utf8_lossy(sentence).into_owned()
        }
    }

    /// Build a valid single-group binary frame for the given field word.
    fn binary_frame(field_word: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![SYNC_BYTE, 0x01];
        frame.extend_from_slice(&field_word.to_le_bytes());
        frame.extend_from_slice(payload);
        let crc = crc16_ccitt(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());
        frame
    }

    fn float_decoder() -> Decoder<TestStore> {
        Decoder::new(TestStore::new().with_floats(0x0008, &["alpha"]))
    }

    #[test]
    fn test_binary_roundtrip_single_float() {
        let mut decoder = float_decoder();
        let frame = binary_frame(0x0008, &42.5f32.to_le_bytes());
        decoder.feed(&frame);

        assert!(decoder.parse());
        assert_eq!(decoder.buffered_len(), 0);

        let message = decoder.pop_message().unwrap();
        assert_eq!(message.kind(), MessageKind::Binary);
        let binary = message.as_binary().unwrap();
        assert_eq!(binary.value_f32("alpha"), Some(42.5));
        let variable = &binary.variables["alpha"];
        assert_eq!(variable.group, "test");
        assert_eq!(variable.field, "Floats");
        assert_eq!(variable.unit, Unit::None);
    }

    #[test]
    fn test_binary_frame_consumed_exactly() {
        let mut decoder = float_decoder();
        let frame = binary_frame(0x0008, &1.0f32.to_le_bytes());
        let mut stream = frame.clone();
        stream.extend_from_slice(&[0x11, 0x22]);
        decoder.feed(&stream);

        assert!(decoder.parse());
        // Only the frame's bytes were removed.
        assert_eq!(decoder.buffered(), &[0x11, 0x22]);
    }

    #[test]
    fn test_crc_failure_halts_without_consuming() {
        let mut decoder = float_decoder();
        let mut frame = binary_frame(0x0008, &3.25f32.to_le_bytes());
        frame[5] ^= 0x01;
        decoder.feed(&frame);

        assert!(!decoder.parse());
        assert_eq!(decoder.pending_messages(), 0);
        assert_eq!(decoder.buffered(), &frame[..]);

        // Same outcome on every retry while no new bytes arrive.
        assert!(!decoder.parse());
        assert_eq!(decoder.buffered(), &frame[..]);
    }

    #[test]
    fn test_any_single_bit_flip_is_rejected() {
        let frame = binary_frame(0x0008, &7.0f32.to_le_bytes());
        for byte in 0..frame.len() - CRC_LEN {
            for bit in 0..8 {
                let mut corrupted = frame.clone();
                corrupted[byte] ^= 1 << bit;
                let mut decoder = float_decoder();
                decoder.feed(&corrupted);
                decoder.parse();
                assert_eq!(
                    decoder.pending_messages(),
                    0,
                    "bit {} of byte {} slipped through",
                    bit,
                    byte
                );
            }
        }
    }

    #[test]
    fn test_unknown_header_is_false_sync() {
        let mut decoder = float_decoder();
        // Valid-looking header with an unregistered field word, followed
        // by a real frame.
        let mut stream = vec![SYNC_BYTE, 0x01, 0xFF, 0xFF];
        stream.extend_from_slice(&binary_frame(0x0008, &2.0f32.to_le_bytes()));
        decoder.feed(&stream);

        assert!(decoder.parse());
        let message = decoder.pop_message().unwrap();
        assert_eq!(message.as_binary().unwrap().value_f32("alpha"), Some(2.0));
        // The false-sync prefix is still buffered.
        assert_eq!(decoder.buffered(), &[SYNC_BYTE, 0x01, 0xFF, 0xFF]);
    }

    #[test]
    fn test_incomplete_binary_waits_for_more_input() {
        let mut decoder = float_decoder();
        let frame = binary_frame(0x0008, &9.0f32.to_le_bytes());

        for split in 1..frame.len() {
            decoder.clear();
            decoder.feed(&frame[..split]);
            assert!(!decoder.parse(), "split at {} produced a message", split);
            decoder.feed(&frame[split..]);
            assert!(decoder.parse(), "split at {} failed to resume", split);
            assert_eq!(decoder.buffered_len(), 0);
        }
    }

    #[test]
    fn test_one_message_per_parse_call() {
        let mut decoder = float_decoder();
        let frame = binary_frame(0x0008, &1.0f32.to_le_bytes());
        let mut stream = frame.clone();
        stream.extend_from_slice(&frame);
        decoder.feed(&stream);

        assert!(decoder.parse());
        assert_eq!(decoder.pending_messages(), 1);
        assert!(decoder.parse());
        assert_eq!(decoder.pending_messages(), 2);
        assert!(!decoder.parse());
    }

    #[test]
    fn test_ascii_roundtrip() {
        let mut decoder = float_decoder();
        decoder.feed(b"$VNRRG,01*72");

        assert!(decoder.parse());
        assert_eq!(decoder.buffered_len(), 0);
        let message = decoder.pop_message().unwrap();
        assert_eq!(message.kind(), MessageKind::Ascii);
        assert_eq!(message.as_ascii().unwrap(), "$VNRRG,01*72");
    }

    #[test]
    fn test_ascii_bad_checksum_not_consumed() {
        let mut decoder = float_decoder();
        decoder.feed(b"$VNRRG,01*00");

        assert!(!decoder.parse());
        assert_eq!(decoder.pending_messages(), 0);
        assert_eq!(decoder.buffered(), b"$VNRRG,01*00");
    }

    #[test]
    fn test_ascii_after_garbage_prefix() {
        let mut decoder = float_decoder();
        decoder.feed(b"\x00\x13garbage$VNRRG,01*72");

        assert!(decoder.parse());
        let message = decoder.pop_message().unwrap();
        assert_eq!(message.as_ascii().unwrap(), "$VNRRG,01*72");
        assert_eq!(decoder.buffered(), b"\x00\x13garbage");
    }

    #[test]
    fn test_ascii_waits_for_terminator_and_digits() {
        let mut decoder = float_decoder();
        decoder.feed(b"$VNRRG,01");
        assert!(!decoder.parse());

        decoder.feed(b"*7");
        assert!(!decoder.parse());

        decoder.feed(b"2");
        assert!(decoder.parse());
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_dollar_without_vn_tag_is_skipped() {
        let mut decoder = float_decoder();
        decoder.feed(b"$GPGGA,x*00$VNRRG,01*72");

        assert!(decoder.parse());
        let message = decoder.pop_message().unwrap();
        assert_eq!(message.as_ascii().unwrap(), "$VNRRG,01*72");
    }

    #[test]
    fn test_reset_mode_skips_binary_but_decodes_ascii() {
        let store = TestStore::new().with_floats(0x0008, &["alpha"]);
        let mut decoder = Decoder::new(store);
        decoder.set_reset_mode(true);

        let mut stream = binary_frame(0x0008, &5.0f32.to_le_bytes());
        stream.extend_from_slice(b"$VNRRG,01*72");
        decoder.feed(&stream);

        assert!(decoder.parse());
        let message = decoder.pop_message().unwrap();
        assert_eq!(message.kind(), MessageKind::Ascii);
        assert!(!decoder.parse());
        assert_eq!(decoder.pending_messages(), 0);

        // Leaving reset mode makes the binary frame decodable again.
        decoder.set_reset_mode(false);
        assert!(decoder.parse());
        assert_eq!(
            decoder.pop_message().unwrap().kind(),
            MessageKind::Binary
        );
    }

    #[test]
    fn test_overflow_keeps_buffer_bounded() {
        let config = DecoderConfig {
            binary_max_len: 32,
            reset_max_len: 16,
            overflow_ratio: 4,
            ..DecoderConfig::default()
        };
        let cap = config.overflow_ratio * config.binary_max_len;
        let store = TestStore::new();
        let mut decoder = Decoder::with_config(store, config);

        // Garbage that never frames: no sync bytes, no '$'.
        for _ in 0..10 {
            decoder.feed(&vec![0xA5; cap]);
            decoder.parse();
            assert!(decoder.buffered_len() <= cap);
        }
    }

    #[test]
    fn test_interleaved_families_preserve_order() {
        let mut decoder = float_decoder();
        let frame = binary_frame(0x0008, &1.25f32.to_le_bytes());
        let mut stream = frame.clone();
        stream.extend_from_slice(b"$VNRRG,01*72");
        stream.extend_from_slice(&frame);
        decoder.feed(&stream);

        while decoder.parse() {}
        let kinds: Vec<_> = decoder
            .drain_messages()
            .iter()
            .map(Message::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![MessageKind::Binary, MessageKind::Ascii, MessageKind::Binary]
        );
    }

    #[test]
    fn test_multi_group_header_arithmetic() {
        // Two enabled groups: header is 1 + 1 + 2*2 bytes.
        let fields = vec![
            FieldSpec {
                group: "a",
                field: "F",
                variable: "x",
                bits: 32,
                encoding: Encoding::Float32Le,
                unit: Unit::None,
            },
            FieldSpec {
                group: "b",
                field: "F",
                variable: "y",
                bits: 32,
                encoding: Encoding::Float32Le,
                unit: Unit::None,
            },
        ];
        let descriptor = HeaderDescriptor::new(0x05, vec![0x0001, 0x0002]);
        let mut store = TestStore::new();
        store
            .layouts
            .insert(descriptor, FrameLayout::from_fields(fields));
        let mut decoder = Decoder::new(store);

        let mut frame = vec![SYNC_BYTE, 0x05, 0x01, 0x00, 0x02, 0x00];
        frame.extend_from_slice(&1.0f32.to_le_bytes());
        frame.extend_from_slice(&2.0f32.to_le_bytes());
        let crc = crc16_ccitt(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());

        decoder.feed(&frame);
        assert!(decoder.parse());
        let message = decoder.pop_message().unwrap();
        let binary = message.as_binary().unwrap();
        assert_eq!(binary.value_f32("x"), Some(1.0));
        assert_eq!(binary.value_f32("y"), Some(2.0));
    }
}
