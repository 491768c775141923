//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so the cursor can read the byte after any source byte without a bounds
//! check. The total buffer size is rounded up to the next 64-byte boundary
//! for cache-line alignment; all padding is `0x00` as well.
//!
//! The bytes are not required to be valid UTF-8. [`SourceBuffer::new`]
//! takes validated text, [`SourceBuffer::from_bytes`] takes whatever the
//! loader read, and encoding errors surface from the codec when the cursor
//! reaches them.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Largest source, in bytes, the cursor can address.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// The source was longer than [`MAX_SOURCE_LEN`]; only its prefix is
    /// addressable.
    oversized: bool,
}

impl SourceBuffer {
    /// Create a buffer from validated source text.
    pub fn new(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Create a buffer from raw source bytes.
    ///
    /// # File Size
    ///
    /// Sources larger than [`MAX_SOURCE_LEN`] bytes (~4 GiB) are accepted
    /// but flagged by [`is_oversized`](Self::is_oversized). `len()` then
    /// saturates at `u32::MAX` and the cursor never reads past it, so
    /// consumers must check the flag before trusting a complete pass.
    pub fn from_bytes(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let (addressable, oversized) = addressable_len(source_len);
        Self {
            buf,
            source_len: addressable,
            oversized,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at the first codepoint.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Returns `true` if the source exceeded [`MAX_SOURCE_LEN`] and was cut
    /// to its addressable prefix.
    pub fn is_oversized(&self) -> bool {
        self.oversized
    }
}

/// Addressable length of a `len`-byte source, and whether it was cut.
fn addressable_len(len: usize) -> (u32, bool) {
    match u32::try_from(len) {
        Ok(len) => (len, false),
        Err(_) => (u32::MAX, true),
    }
}

/// Size assertion: Vec<u8> = 24, u32 = 4, bool = 1, + 3 padding = 32.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests;
