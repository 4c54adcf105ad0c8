//! Input buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for the raw byte storage, with a parallel vector
//! of per-byte scan tags. The transport appends; the scanner marks bytes as
//! it rules them out and splices consumed frames; the janitor prunes stale
//! and overflowing bytes from the front. Bytes are never reordered, and
//! removal only ever happens as a contiguous oldest-first prefix or as the
//! slice of a consumed frame.

use bytes::{Bytes, BytesMut};

use crate::decoder::DecoderConfig;

/// How far scanning has progressed on one buffered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Not yet considered by any scan pass.
    Unchecked,
    /// Ruled out as a binary frame start; ASCII still possible.
    BinaryChecked,
    /// Ruled out as the start of any frame.
    AllChecked,
}

/// Accumulates raw transport bytes until the scanner can frame them.
#[derive(Debug, Default)]
pub struct InputBuffer {
    data: BytesMut,
    status: Vec<ScanStatus>,
}

impl InputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        InputBuffer {
            data: BytesMut::new(),
            status: Vec::new(),
        }
    }

    /// Append newly received bytes, tagged `Unchecked`.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        self.status
            .resize(self.status.len() + bytes.len(), ScanStatus::Unchecked);
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The buffered bytes as a contiguous slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Byte value at `index`.
    pub fn byte(&self, index: usize) -> u8 {
        self.data[index]
    }

    /// Scan tag of the byte at `index`.
    pub fn status(&self, index: usize) -> ScanStatus {
        self.status[index]
    }

    /// Update the scan tag of the byte at `index`.
    pub fn set_status(&mut self, index: usize, status: ScanStatus) {
        self.status[index] = status;
    }

    /// Remove the frame occupying `start..start + len` and return its bytes.
    ///
    /// Bytes before `start` stay in place with their tags; they are garbage
    /// in front of a valid frame and the janitor reclaims them once old
    /// enough.
    pub fn splice(&mut self, start: usize, len: usize) -> Bytes {
        debug_assert!(start + len <= self.data.len());
        let mut tail = self.data.split_off(start);
        let frame = tail.split_to(len);
        self.data.unsplit(tail);
        self.status.drain(start..start + len);
        frame.freeze()
    }

    /// Drop everything, tags included.
    pub fn clear(&mut self) {
        self.data.clear();
        self.status.clear();
    }

    /// Prune the buffer to bound memory and discard bytes that are provably
    /// not part of any pending message.
    ///
    /// Two rules, both expressed as an oldest-first prefix cut so the
    /// ordering invariant holds:
    ///
    /// 1. A leading run of `AllChecked` bytes more than
    ///    `2 * max_frame_length` behind the newest byte was not claimed by
    ///    any frame within two frame-lengths of slack and is stale fragment
    ///    data. `max_frame_length` is `reset_max_len` in reset mode,
    ///    `binary_max_len` otherwise.
    /// 2. Any byte more than `overflow_ratio * binary_max_len` behind the
    ///    newest byte is dropped unconditionally. This is the hard memory
    ///    cap; under sustained overflow it loses data rather than growing.
    pub fn clean(&mut self, reset_mode: bool, config: &DecoderConfig) {
        let len = self.len();
        if len == 0 {
            return;
        }

        let max_frame_len = if reset_mode {
            config.reset_max_len
        } else {
            config.binary_max_len
        };
        let stale_distance = 2 * max_frame_len;

        // Rule 1: contiguous fully-scanned stale prefix.
        let mut cut = 0;
        while cut < len
            && self.status[cut] == ScanStatus::AllChecked
            && len - cut > stale_distance
        {
            cut += 1;
        }

        // Rule 2: hard cap, regardless of scan status.
        let cap = config.overflow_ratio * config.binary_max_len;
        if len > cap {
            cut = cut.max(len - cap);
        }

        if cut > 0 {
            log::debug!("janitor: evicting {} of {} buffered bytes", cut, len);
            let _ = self.data.split_to(cut);
            self.status.drain(..cut);
        }
    }
}
