//! Codepoint codec for the historical (RFC 2279) form of UTF-8.
//!
//! Sequences may be 1 to 6 bytes long, so decoded values range over
//! `0..=0x7FFF_FFFF` rather than stopping at `char::MAX`. Values are
//! therefore plain `u32`s; scanners that need Rust text convert them to
//! `char` themselves and report the ones that do not fit.
//!
//! The sequence length is announced by the high bits of the leading byte:
//!
//! ```text
//! 0xxxxxxx                     1 byte   (7 payload bits)
//! 110xxxxx 10xxxxxx            2 bytes  (11)
//! 1110xxxx 10xxxxxx ...        3 bytes  (16)
//! 11110xxx 10xxxxxx ...        4 bytes  (21)
//! 111110xx 10xxxxxx ...        5 bytes  (26)
//! 1111110x 10xxxxxx ...        6 bytes  (31)
//! ```
//!
//! Both directions are pure and allocation-free.

use thiserror::Error;

/// Longest sequence the codec reads or writes.
pub const MAX_SEQUENCE_LEN: usize = 6;

/// Largest codepoint representable in six bytes.
pub const MAX_CODEPOINT: u32 = 0x7FFF_FFFF;

/// Payload mask for the leading byte of an `n`-byte sequence (index = `n`).
const LEAD_PAYLOAD: [u8; MAX_SEQUENCE_LEN + 1] = [0x00, 0x7F, 0x1F, 0x0F, 0x07, 0x03, 0x01];

/// Marker bits for the leading byte of an `n`-byte sequence (index = `n`).
const LEAD_MARKER: [u8; MAX_SEQUENCE_LEN + 1] = [0x00, 0x00, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC];

/// Failure to decode or encode a codepoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Utf8Error {
    /// The leading byte matches none of the six length patterns
    /// (a bare continuation byte, `0xFE` or `0xFF`).
    #[error("invalid UTF-8 leading byte 0x{byte:02X}")]
    InvalidLeadByte { byte: u8 },
    /// A byte inside the sequence is not of the form `10xxxxxx`.
    #[error("invalid UTF-8 continuation byte 0x{byte:02X} at index {index}")]
    InvalidContinuation { byte: u8, index: u8 },
    /// The input ended before the announced sequence length.
    #[error("truncated UTF-8 sequence: expected {expected} bytes, found {found}")]
    Truncated { expected: u8, found: u8 },
    /// The codepoint needs more than six bytes.
    #[error("codepoint 0x{codepoint:X} cannot be encoded")]
    CodepointOutOfRange { codepoint: u32 },
}

/// Number of bytes in the sequence introduced by `lead`.
///
/// Returns `None` for continuation bytes (`0x80..=0xBF`) and for
/// `0xFE`/`0xFF`, which never start a sequence.
#[inline]
pub const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        0xF8..=0xFB => Some(5),
        0xFC..=0xFD => Some(6),
        _ => None,
    }
}

/// Number of bytes [`encode`] writes for `codepoint` (shortest form).
#[inline]
pub const fn encoded_len(codepoint: u32) -> Option<usize> {
    match codepoint {
        0..=0x7F => Some(1),
        0x80..=0x7FF => Some(2),
        0x800..=0xFFFF => Some(3),
        0x1_0000..=0x1F_FFFF => Some(4),
        0x20_0000..=0x3FF_FFFF => Some(5),
        0x400_0000..=MAX_CODEPOINT => Some(6),
        _ => None,
    }
}

/// Decode the sequence at the start of `bytes`.
///
/// Returns the codepoint and the number of bytes it occupied. Bytes after
/// the sequence are ignored.
#[allow(
    clippy::cast_possible_truncation,
    reason = "lengths compared here are at most MAX_SEQUENCE_LEN"
)]
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), Utf8Error> {
    let Some(&lead) = bytes.first() else {
        return Err(Utf8Error::Truncated {
            expected: 1,
            found: 0,
        });
    };
    let len = sequence_len(lead).ok_or(Utf8Error::InvalidLeadByte { byte: lead })?;
    if bytes.len() < len {
        return Err(Utf8Error::Truncated {
            expected: len as u8,
            found: bytes.len() as u8,
        });
    }

    let mut codepoint = u32::from(lead & LEAD_PAYLOAD[len]);
    for (i, &byte) in bytes[1..len].iter().enumerate() {
        if byte & 0xC0 != 0x80 {
            return Err(Utf8Error::InvalidContinuation {
                byte,
                index: i as u8 + 1,
            });
        }
        codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
    }
    Ok((codepoint, len))
}

/// Encode `codepoint` into `buf`, returning the written prefix.
///
/// Always produces the shortest sequence, so `decode(encode(c)) == (c, len)`
/// for every `c` in `0..=MAX_CODEPOINT`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each written byte is masked to 6 bits or shifted below the marker"
)]
pub fn encode(codepoint: u32, buf: &mut [u8; MAX_SEQUENCE_LEN]) -> Result<&[u8], Utf8Error> {
    let len = encoded_len(codepoint).ok_or(Utf8Error::CodepointOutOfRange { codepoint })?;
    let mut rest = codepoint;
    for slot in buf[1..len].iter_mut().rev() {
        *slot = 0x80 | (rest & 0x3F) as u8;
        rest >>= 6;
    }
    buf[0] = LEAD_MARKER[len] | rest as u8;
    Ok(&buf[..len])
}
