//! VectorNav VN-100 Serial Protocol Decoder
//!
//! This crate turns the raw byte stream coming off a VN-100 inertial
//! measurement unit into structured messages. The sensor interleaves two
//! message families on one serial channel:
//!
//! - **Binary output frames**: a 0xFA sync byte, a group-enable byte, one
//!   little-endian field-enable word per enabled group, a schema-described
//!   payload, and a trailing CRC-16.
//! - **ASCII sentences**: `$VN...*XX` command responses and asynchronous
//!   outputs, protected by an 8-bit XOR checksum.
//!
//! The transport may deliver partial, garbled, or interleaved data, so the
//! decoder buffers everything it receives, scans for well-formed frames,
//! validates their checksums, and bounds its own memory use by pruning
//! bytes that can no longer belong to any pending message.
//!
//! Payload layouts live behind the [`SchemaStore`] trait; this crate does
//! not know what any output register contains.
//!
//! # Example
//!
//! ```rust,ignore
//! use vn100_protocol::Decoder;
//!
//! let mut decoder = Decoder::new(store);
//! loop {
//!     decoder.feed(&serial_read());
//!     while decoder.parse() {}
//!     for message in decoder.drain_messages() {
//!         handle(message);
//!     }
//! }
//! ```

mod buffer;
mod checksum;
mod constants;
mod decoder;
mod error;
mod message;
mod schema;

pub use buffer::*;
pub use checksum::*;
pub use constants::*;
pub use decoder::*;
pub use error::*;
pub use message::*;
pub use schema::*;
