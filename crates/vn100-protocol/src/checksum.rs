//! Frame integrity checks.
//!
//! The VN-100 protects binary frames with a 16-bit CRC (CCITT polynomial,
//! zero initial value) and ASCII sentences with an 8-bit running XOR
//! rendered as two hex digits. Both checks are pure functions over a byte
//! range with no shared state.

use crate::constants::CRC_LEN;

/// Compute the CRC-16/CCITT of a byte range (initial value 0).
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc = crc.rotate_left(8);
        crc ^= byte as u16;
        crc ^= (crc & 0xFF) >> 4;
        crc ^= crc << 12;
        crc ^= (crc & 0xFF) << 5;
    }
    crc
}

/// Verify a binary frame carrying its CRC in the trailing two bytes
/// (little-endian). Returns `false` for frames too short to hold a CRC.
pub fn crc16_verify(frame: &[u8]) -> bool {
    if frame.len() < CRC_LEN {
        return false;
    }
    let (body, trailer) = frame.split_at(frame.len() - CRC_LEN);
    let stored = u16::from_le_bytes([trailer[0], trailer[1]]);
    crc16_ccitt(body) == stored
}

/// Compute the 8-bit XOR checksum of a byte range.
pub fn xor_checksum8(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, &byte| acc ^ byte)
}

/// Verify an ASCII sentence body against its two-hex-digit checksum.
///
/// `body` is the byte range strictly between the `$` and the `*`;
/// `digits` is the rendered checksum following the `*`. Hex digits are
/// accepted in either case.
pub fn xor_verify(body: &[u8], digits: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(digits) else {
        return false;
    };
    let Ok(stored) = u8::from_str_radix(text, 16) else {
        return false;
    };
    xor_checksum8(body) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_check_value() {
        // Standard CCITT/XModem check value.
        assert_eq!(crc16_ccitt(b"123456789"), 0x31C3);
    }

    #[test]
    fn test_crc16_empty_is_zero() {
        assert_eq!(crc16_ccitt(&[]), 0);
    }

    #[test]
    fn test_crc16_verify_roundtrip() {
        let body = [0xFA, 0x01, 0x08, 0x00, 0x12, 0x34, 0x56, 0x78];
        let crc = crc16_ccitt(&body);
        let mut frame = body.to_vec();
        frame.extend_from_slice(&crc.to_le_bytes());
        assert!(crc16_verify(&frame));
    }

    #[test]
    fn test_crc16_verify_detects_flip() {
        let body = [0xFA, 0x01, 0x08, 0x00, 0x12, 0x34, 0x56, 0x78];
        let crc = crc16_ccitt(&body);
        let mut frame = body.to_vec();
        frame.extend_from_slice(&crc.to_le_bytes());
        frame[4] ^= 0x01;
        assert!(!crc16_verify(&frame));
    }

    #[test]
    fn test_crc16_verify_too_short() {
        assert!(!crc16_verify(&[0x42]));
        assert!(!crc16_verify(&[]));
    }

    #[test]
    fn test_xor_checksum_known_sentence() {
        // From the VN-100 reference sentence "$VNRRG,01*72".
        assert_eq!(xor_checksum8(b"VNRRG,01"), 0x72);
    }

    #[test]
    fn test_xor_verify_accepts_both_cases() {
        assert!(xor_verify(b"VNRRG,01", b"72"));
        assert!(xor_verify(b"VNWRG,06,1", b"6D"));
        assert!(xor_verify(b"VNWRG,06,1", b"6d"));
    }

    #[test]
    fn test_xor_verify_rejects_wrong_digits() {
        assert!(!xor_verify(b"VNRRG,01", b"00"));
        assert!(!xor_verify(b"VNRRG,01", b"ZZ"));
        assert!(!xor_verify(b"VNRRG,01", &[0xFF, 0xFF]));
    }
}
