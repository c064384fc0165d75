//! Helpers for computing and applying cyclic redundancy checks.
//!
//! Both directions of the protocol are sealed with CRC-16/XMODEM (polynomial
//! `0x1021`, MSB-first, zero initial value), stored big-endian in the final two
//! bytes of the message.

const POLYNOMIAL: u16 = 0x1021;

/// Compute the CRC-16/XMODEM of a slice of bytes.
pub fn crc16_xmodem(r: &[u8]) -> u16 {
    compute_crc(0, r)
}

/// Accumulate a slice of bytes into a cyclic redundancy check value.
pub fn compute_crc(init: u16, r: &[u8]) -> u16 {
    r.iter().fold(init, |acc, b| crc_byte(acc, *b))
}

/// Accumulate a single byte into a cyclic redundancy check value.
fn crc_byte(mut crc: u16, b: u8) -> u16 {
    crc ^= (b as u16) << 8;

    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ POLYNOMIAL
        } else {
            crc << 1
        };
    }

    crc
}

/// Split a message into its body and the checksum found in its trailer.
///
/// Returns `None` for messages shorter than three bytes, which cannot hold
/// both a body and a trailer.
pub fn split_crc(r: &[u8]) -> Option<(&[u8], u16)> {
    if r.len() < 3 {
        return None;
    }

    let (body, trailer) = r.split_at(r.len() - 2);
    let found = u16::from_be_bytes([trailer[0], trailer[1]]);

    Some((body, found))
}

/// Check that the trailer of a message matches the checksum of its body.
///
/// Fails closed: messages shorter than three bytes never verify.
pub fn verify_crc(r: &[u8]) -> bool {
    split_crc(r).is_some_and(|(body, found)| crc16_xmodem(body) == found)
}

/// Compute the big-endian trailer sealing a message body.
pub fn crc_trailer(r: &[u8]) -> [u8; 2] {
    crc16_xmodem(r).to_be_bytes()
}

/// Copy a message body and seal it with its checksum trailer.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn append_crc(r: &[u8]) -> std::vec::Vec<u8> {
    let mut sealed = std::vec::Vec::with_capacity(r.len() + 2);
    sealed.extend_from_slice(r);
    sealed.extend_from_slice(&crc_trailer(r));
    sealed
}
