//! Codepoint cursor with exact backward stepping.
//!
//! The cursor decodes one codepoint at a time from a sentinel-terminated
//! buffer and keeps a running (line, column) [`Position`]. Every forward
//! step records what it consumed, so [`Cursor::retreat`] can undo it
//! exactly: the byte offset comes back from the width history, and the
//! column before a line break comes back from the saved-column history.
//!
//! # Line Breaks
//!
//! `\n` ends a line. `\r` ends a line too unless a `\n` follows, in which
//! case the pair counts once. The `\r` still resets the column, so the
//! position of the `\n` in a CRLF pair is column 0 of the old line.
//!
//! # End of Input
//!
//! At `pos >= source_len` the cursor reads the sentinel codepoint `0` and
//! [`Cursor::advance`] no longer moves. A `0x00` byte before `source_len`
//! is an ordinary (if unusual) codepoint.

use thiserror::Error;

use crate::utf8::{self, Utf8Error};
use crate::Position;

/// Columns a horizontal tab occupies.
pub const TAB_WIDTH: u32 = 4;

const TAB: u32 = 0x09;
const LF: u32 = 0x0A;
const CR: u32 = 0x0D;
const BACKSPACE: u32 = 0x08;

/// Failure while stepping the cursor forward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CursorError {
    /// The bytes at `offset` are not a valid sequence.
    #[error("invalid encoding at byte {offset}: {source}")]
    InvalidEncoding {
        offset: u32,
        #[source]
        source: Utf8Error,
    },
    /// A control character whose effect on the column is undefined.
    #[error("unsupported control character U+{codepoint:04X}")]
    UnsupportedControl { codepoint: u32 },
}

/// Checkpoint returned by [`Cursor::mark`].
///
/// Only meaningful for the cursor that produced it, and only while that
/// cursor has not stepped back past it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mark {
    pos: u32,
    position: Position,
    widths: usize,
    saved_columns: usize,
}

impl Mark {
    /// Position of the codepoint the cursor pointed at when marked.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset the cursor was at when marked.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }
}

/// Position-tracking codepoint cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`. This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
    line: u32,
    column: u32,
    /// Byte length of every consumed codepoint, oldest first.
    widths: Vec<u8>,
    /// Column in effect before each consumed `\n` or `\r`.
    saved_columns: Vec<u32>,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
            line: 0,
            column: 0,
            widths: Vec::new(),
            saved_columns: Vec::new(),
        }
    }

    /// Decode the codepoint starting at `offset`.
    ///
    /// Returns `(0, 0)` at or past the end of the source.
    fn decode_at(&self, offset: u32) -> Result<(u32, usize), CursorError> {
        if offset >= self.source_len {
            return Ok((0, 0));
        }
        // Decoding into the sentinel region turns a sequence cut short by
        // the end of input into an invalid continuation byte.
        utf8::decode(&self.buf[offset as usize..])
            .map_err(|source| CursorError::InvalidEncoding { offset, source })
    }

    /// Codepoint at the cursor, or `0` at end of input.
    #[inline]
    pub fn peek(&self) -> Result<u32, CursorError> {
        self.decode_at(self.pos).map(|(codepoint, _)| codepoint)
    }

    /// Codepoint `n` places ahead of the cursor (`peek_at(0) == peek()`).
    ///
    /// Returns `0` once the lookahead runs past the end of input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sequence lengths are at most MAX_SEQUENCE_LEN"
    )]
    pub fn peek_at(&self, n: usize) -> Result<u32, CursorError> {
        let mut offset = self.pos;
        for _ in 0..n {
            let (_, len) = self.decode_at(offset)?;
            if len == 0 {
                return Ok(0);
            }
            offset += len as u32;
        }
        self.decode_at(offset).map(|(codepoint, _)| codepoint)
    }

    /// Number of codepoints left before end of input, counting at most `max`.
    ///
    /// Steps by leading-byte length only; malformed sequences count as one
    /// codepoint each and are reported when actually decoded.
    pub fn remaining(&self, max: usize) -> usize {
        let mut offset = self.pos as usize;
        let end = self.source_len as usize;
        let mut count = 0;
        while count < max && offset < end {
            offset += utf8::sequence_len(self.buf[offset]).map_or(1, |len| len);
            count += 1;
        }
        count
    }

    /// Returns `true` if at least `n` codepoints remain.
    #[inline]
    pub fn has_more(&self, n: usize) -> bool {
        self.remaining(n) >= n
    }

    /// Consume the codepoint at the cursor and return it.
    ///
    /// At end of input returns `Ok(0)` and stays put. On error the cursor
    /// does not move.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sequence lengths are at most MAX_SEQUENCE_LEN"
    )]
    pub fn advance(&mut self) -> Result<u32, CursorError> {
        let (codepoint, len) = self.decode_at(self.pos)?;
        if len == 0 {
            return Ok(0);
        }
        match codepoint {
            BACKSPACE => return Err(CursorError::UnsupportedControl { codepoint }),
            TAB => self.column += TAB_WIDTH,
            LF => self.break_line(true),
            CR => {
                let lf_follows = self.lf_follows(self.pos);
                self.break_line(!lf_follows);
            }
            _ => self.column += 1,
        }
        self.widths.push(len as u8);
        self.pos += len as u32;
        Ok(codepoint)
    }

    /// Undo the most recent [`advance`](Self::advance).
    ///
    /// # Panics
    ///
    /// Panics if nothing has been consumed since creation, the last
    /// [`rewind`](Self::rewind), or the last [`reset`](Self::reset) to a
    /// mark at the current depth.
    pub fn retreat(&mut self) {
        let Some(width) = self.widths.pop() else {
            panic!("Cursor::retreat called with no consumed codepoint to undo");
        };
        self.pos -= u32::from(width);
        // Only ASCII leading bytes change the column by other than one.
        match u32::from(self.buf[self.pos as usize]) {
            TAB => self.column -= TAB_WIDTH,
            LF => self.unbreak_line(true),
            CR => {
                let lf_follows = self.lf_follows(self.pos);
                self.unbreak_line(!lf_follows);
            }
            _ => self.column -= 1,
        }
    }

    /// Checkpoint the cursor for a later [`reset`](Self::reset).
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            position: self.position(),
            widths: self.widths.len(),
            saved_columns: self.saved_columns.len(),
        }
    }

    /// Return to a checkpoint taken earlier on this cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor has retreated behind the mark since it was taken.
    pub fn reset(&mut self, mark: Mark) {
        assert!(
            mark.pos <= self.pos
                && mark.widths <= self.widths.len()
                && mark.saved_columns <= self.saved_columns.len(),
            "Cursor::reset to a mark ahead of the cursor (mark at byte {}, cursor at byte {})",
            mark.pos,
            self.pos
        );
        self.pos = mark.pos;
        self.line = mark.position.line;
        self.column = mark.position.column;
        self.widths.truncate(mark.widths);
        self.saved_columns.truncate(mark.saved_columns);
    }

    /// Move back to the start of input and forget all history.
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.line = 0;
        self.column = 0;
        self.widths.clear();
        self.saved_columns.clear();
    }

    /// Consume codepoints while `pred` holds and input remains.
    pub fn eat_while(&mut self, pred: impl Fn(u32) -> bool) -> Result<(), CursorError> {
        while !self.is_eof() && pred(self.peek()?) {
            self.advance()?;
        }
        Ok(())
    }

    /// Position of the codepoint the cursor points at.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Current byte offset into the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content in bytes.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the cursor has consumed the whole source.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Returns the source bytes in `start..end` (clamped to the source).
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        &self.buf[start..end]
    }

    /// Whether the byte after the `\r` at `offset` is a `\n` in the source.
    #[inline]
    fn lf_follows(&self, offset: u32) -> bool {
        offset + 1 < self.source_len && self.buf[offset as usize + 1] == b'\n'
    }

    fn break_line(&mut self, counts: bool) {
        self.saved_columns.push(self.column);
        self.column = 0;
        if counts {
            self.line += 1;
        }
    }

    fn unbreak_line(&mut self, counted: bool) {
        debug_assert!(
            !self.saved_columns.is_empty(),
            "line break consumed without a saved column"
        );
        self.column = self.saved_columns.pop().unwrap_or_default();
        if counted {
            self.line -= 1;
        }
    }
}
