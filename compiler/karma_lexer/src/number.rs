//! Prefixed integer literals with optional type suffix.
//!
//! ```text
//! literal := '0' prefix digit_or_sep+ suffix?
//! prefix  := 'b' | 'B' | 'o' | 'O' | 'x' | 'X'
//! suffix  := 'i8' | 'i16' | 'i32' | 'i64' | 'isize'
//!          | 'u8' | 'u16' | 'u32' | 'u64' | 'usize' | 'f32' | 'f64'
//! ```
//!
//! Digits accumulate into a `u64`; `_` separators are skipped and do not
//! count toward the per-radix digit limit. Unprefixed decimal literals are
//! not part of the language.
//!
//! The suffix is the identifier run right after the digits. If it names no
//! type the cursor is reset to the end of the digits, the literal gets the
//! default kind `u64`, and the run lexes as the next token. Hex digit runs
//! are maximal, so `0x10f32` is the hex value `0x10F32`, not `0x10` as `f32`.

use std::fmt;

use karma_lexer_core::Cursor;

use crate::lex_error::{LexError, LiteralProblem};
use crate::token::{NumberLit, NumericKind};
use crate::tokenizer::is_ident_continue;

/// Base selected by a literal prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}

impl Radix {
    /// Resolve the letter after the leading `0`.
    pub fn from_prefix(c: u32) -> Option<Self> {
        match char::from_u32(c)? {
            'b' | 'B' => Some(Radix::Binary),
            'o' | 'O' => Some(Radix::Octal),
            'x' | 'X' => Some(Radix::Hex),
            _ => None,
        }
    }

    /// Bits contributed by each digit.
    pub const fn bits_per_digit(self) -> u32 {
        match self {
            Radix::Binary => 1,
            Radix::Octal => 3,
            Radix::Hex => 4,
        }
    }

    /// Most digits a literal may have in this base.
    pub const fn max_digits(self) -> u32 {
        match self {
            Radix::Binary => 64,
            Radix::Octal => 21,
            Radix::Hex => 16,
        }
    }

    /// Value of `c` as a digit in this base.
    pub fn digit(self, c: u32) -> Option<u32> {
        let value = char::from_u32(c)?.to_digit(16)?;
        (value < 1 << self.bits_per_digit()).then_some(value)
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Hex => "hexadecimal",
        })
    }
}

/// Scan a numeric literal starting at the digit under the cursor.
///
/// Anything other than `0` followed by a base prefix is an invalid token at
/// the first digit.
pub(crate) fn scan(cursor: &mut Cursor<'_>) -> Result<NumberLit, LexError> {
    let start = cursor.position();
    let lead = advance(cursor)?;
    if lead != u32::from('0') {
        return Err(LexError::invalid_token(start, lead));
    }
    let Some(radix) = Radix::from_prefix(peek(cursor)?) else {
        return Err(LexError::invalid_token(start, lead));
    };
    advance(cursor)?;

    let value = match digits(cursor, radix)? {
        Ok(value) => value,
        Err(reason) => return Err(LexError::invalid_literal(start, radix, reason)),
    };
    let kind = suffix(cursor)?;
    NumberLit::new(kind, value).ok_or_else(|| {
        LexError::invalid_literal(start, radix, LiteralProblem::OutOfRange { kind })
    })
}

/// Accumulate the digit run after the prefix.
///
/// The outer error is a cursor failure; the inner one is a malformed run.
fn digits(
    cursor: &mut Cursor<'_>,
    radix: Radix,
) -> Result<Result<u64, LiteralProblem>, LexError> {
    let max = radix.max_digits();
    let mut value: u64 = 0;
    let mut count: u32 = 0;
    while !cursor.is_eof() {
        let c = peek(cursor)?;
        if c == u32::from('_') {
            advance(cursor)?;
            continue;
        }
        let Some(digit) = radix.digit(c) else {
            break;
        };
        advance(cursor)?;
        count += 1;
        if count <= max {
            value = (value << radix.bits_per_digit()) | u64::from(digit);
        }
    }
    Ok(match count {
        0 => Err(LiteralProblem::NoDigits),
        n if n > max => Err(LiteralProblem::TooManyDigits { count: n, max }),
        _ => Ok(value),
    })
}

/// Consume a type suffix if one follows; otherwise leave the cursor alone.
fn suffix(cursor: &mut Cursor<'_>) -> Result<NumericKind, LexError> {
    let mark = cursor.mark();
    cursor
        .eat_while(is_ident_continue)
        .map_err(|e| LexError::from_cursor(cursor.position(), e))?;
    let text = cursor.slice(mark.pos(), cursor.pos());
    if text.is_empty() {
        return Ok(NumericKind::default());
    }
    let Some(kind) = std::str::from_utf8(text).ok().and_then(NumericKind::from_suffix) else {
        tracing::trace!(pos = %mark.position(), "unrecognized literal suffix left for the next token");
        cursor.reset(mark);
        return Ok(NumericKind::default());
    };
    Ok(kind)
}

fn peek(cursor: &Cursor<'_>) -> Result<u32, LexError> {
    cursor
        .peek()
        .map_err(|e| LexError::from_cursor(cursor.position(), e))
}

fn advance(cursor: &mut Cursor<'_>) -> Result<u32, LexError> {
    cursor
        .advance()
        .map_err(|e| LexError::from_cursor(cursor.position(), e))
}
