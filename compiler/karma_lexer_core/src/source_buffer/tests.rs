use super::*;
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn empty_source() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.as_bytes().is_empty());
    // Sentinel present at index 0
    assert_eq!(buf.as_sentinel_bytes()[0], 0);
}

#[test]
fn ascii_source() {
    let buf = SourceBuffer::new("fn main");
    assert_eq!(buf.len(), 7);
    assert!(!buf.is_empty());
    assert_eq!(buf.as_bytes(), b"fn main");
    assert_eq!(buf.as_sentinel_bytes()[7], 0);
}

#[test]
fn utf8_multibyte_source() {
    let source = "a \u{1F600} b";
    let buf = SourceBuffer::new(source);
    assert_eq!(buf.len() as usize, source.len());
    assert_eq!(buf.as_bytes(), source.as_bytes());
}

#[test]
fn raw_bytes_are_kept_verbatim() {
    // Not valid UTF-8; the buffer does not care.
    let buf = SourceBuffer::from_bytes(&[b'a', 0xFF, 0xC3]);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_bytes(), &[b'a', 0xFF, 0xC3]);
    assert_eq!(buf.as_sentinel_bytes()[3], 0);
}

// === Cache-Line Alignment ===

#[test]
fn buffer_aligned_to_cache_line() {
    for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
        let source: String = "x".repeat(len);
        let buf = SourceBuffer::new(&source);
        assert_eq!(
            buf.as_sentinel_bytes().len() % CACHE_LINE,
            0,
            "buffer length {} is not cache-line aligned for source length {}",
            buf.as_sentinel_bytes().len(),
            len
        );
        assert!(buf.as_sentinel_bytes().len() > len, "no room for sentinel");
    }
}

#[test]
fn sentinel_and_padding_are_zero() {
    let buf = SourceBuffer::new("abc");
    for &b in &buf.as_sentinel_bytes()[3..] {
        assert_eq!(b, 0, "non-zero byte in sentinel/padding region");
    }
}

// === Cursor Creation ===

#[test]
fn cursor_starts_at_zero() {
    let buf = SourceBuffer::new("hello");
    let cursor = buf.cursor();
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.peek(), Ok(u32::from(b'h')));
}

#[test]
fn cursor_on_empty_source_is_eof() {
    let buf = SourceBuffer::new("");
    let cursor = buf.cursor();
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), Ok(0));
}

// === Size Limit ===

#[test]
fn ordinary_sources_are_not_oversized() {
    assert!(!SourceBuffer::new("").is_oversized());
    assert!(!SourceBuffer::new("fn main").is_oversized());
}

#[test]
fn addressable_len_saturates_past_the_limit() {
    assert_eq!(addressable_len(0), (0, false));
    assert_eq!(addressable_len(MAX_SOURCE_LEN), (u32::MAX, false));
    #[cfg(target_pointer_width = "64")]
    {
        assert_eq!(addressable_len(MAX_SOURCE_LEN + 1), (u32::MAX, true));
        assert_eq!(addressable_len(usize::MAX), (u32::MAX, true));
    }
}
