//! Lexer error types.
//!
//! A [`LexError`] is WHERE (a [`Position`]) plus WHAT (a [`LexErrorKind`]).
//! The first error ends the run; there is no recovery and no accumulation.
//!
//! Errors from the core crate ([`Utf8Error`], [`CursorError`]) are mapped
//! to kinds here, at the boundary where a position is known.

use std::fmt;

use karma_lexer_core::{CursorError, Position, Utf8Error, MAX_SOURCE_LEN};
use thiserror::Error;

use crate::number::Radix;
use crate::token::NumericKind;

/// A positioned tokenizer failure.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{pos}: {kind}")]
pub struct LexError {
    /// WHERE the error occurred.
    pub pos: Position,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// Bytes that form no supported UTF-8 sequence.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[source] Utf8Error),
    /// A codepoint that starts no token.
    #[error("unexpected character {}", Codepoint(*.codepoint))]
    InvalidToken { codepoint: u32 },
    /// Missing closing `"` for string literal.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Missing closing `*/` for block comment.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A malformed numeric literal.
    #[error("invalid {radix} literal: {reason}")]
    InvalidLiteral { radix: Radix, reason: LiteralProblem },
    /// Escape character outside the escape table (e.g., `\q`).
    #[error("invalid escape sequence `\\{}`", Codepoint(*.escape).bare())]
    InvalidEscape { escape: u32 },
    /// A closing bracket that does not close the innermost opener.
    #[error("{}", unmatched_message(*.found, *.expected))]
    UnmatchedBracket { found: char, expected: Option<char> },
    /// Openers still pending at end of input, outermost first.
    #[error("{}", unbalanced_message(.pending))]
    UnbalancedBrackets { pending: Vec<PendingBracket> },
    /// A source longer than the cursor can address.
    #[error("source exceeds {} bytes", MAX_SOURCE_LEN)]
    SourceTooLarge,
    /// A recognized but unimplemented feature.
    #[error("{feature} is not supported")]
    UnsupportedEscape { feature: Unsupported },
}

/// Why a numeric literal was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum LiteralProblem {
    /// More digits than fit in 64 bits for the radix.
    #[error("{count} digits, at most {max} allowed")]
    TooManyDigits { count: u32, max: u32 },
    /// A prefix with no digits after it (`0x`, `0b_`).
    #[error("no digits after the prefix")]
    NoDigits,
    /// The value does not fit the suffix type.
    #[error("value out of range for `{}`", .kind.suffix())]
    OutOfRange { kind: NumericKind },
}

/// Features the lexer recognizes only to reject.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Unsupported {
    /// `\u` escapes in string literals.
    #[error("unicode escape `\\u`")]
    UnicodeEscape,
    /// A raw backspace (U+0008) in the source.
    #[error("backspace character")]
    Backspace,
}

/// An opening bracket still waiting for its closer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PendingBracket {
    pub open: char,
    pub pos: Position,
}

impl fmt::Display for PendingBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` at {}", self.open, self.pos)
    }
}

/// Renders a codepoint as `'x'`, or `U+XXXX` when it is not printable.
struct Codepoint(u32);

impl Codepoint {
    fn bare(&self) -> String {
        match char::from_u32(self.0) {
            Some(c) if !c.is_control() => c.to_string(),
            _ => format!("U+{:04X}", self.0),
        }
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(self.0) {
            Some(c) if !c.is_control() => write!(f, "'{c}'"),
            _ => write!(f, "U+{:04X}", self.0),
        }
    }
}

fn unmatched_message(found: char, expected: Option<char>) -> String {
    match expected {
        Some(expected) => format!("mismatched bracket: expected `{expected}`, found `{found}`"),
        None => format!("unmatched closing bracket `{found}`"),
    }
}

fn unbalanced_message(pending: &[PendingBracket]) -> String {
    let list: Vec<String> = pending.iter().map(ToString::to_string).collect();
    format!("unclosed bracket(s): {}", list.join(", "))
}

impl LexError {
    #[inline]
    pub fn new(pos: Position, kind: LexErrorKind) -> Self {
        LexError { pos, kind }
    }

    /// Create an invalid encoding error.
    #[cold]
    pub fn invalid_encoding(pos: Position, err: Utf8Error) -> Self {
        Self::new(pos, LexErrorKind::InvalidEncoding(err))
    }

    /// Create an invalid token error.
    #[cold]
    pub fn invalid_token(pos: Position, codepoint: u32) -> Self {
        Self::new(pos, LexErrorKind::InvalidToken { codepoint })
    }

    /// Create an unterminated string error.
    #[cold]
    pub fn unterminated_string(pos: Position) -> Self {
        Self::new(pos, LexErrorKind::UnterminatedString)
    }

    /// Create an unterminated block comment error.
    #[cold]
    pub fn unterminated_comment(pos: Position) -> Self {
        Self::new(pos, LexErrorKind::UnterminatedComment)
    }

    /// Create an invalid numeric literal error.
    #[cold]
    pub fn invalid_literal(pos: Position, radix: Radix, reason: LiteralProblem) -> Self {
        Self::new(pos, LexErrorKind::InvalidLiteral { radix, reason })
    }

    /// Create an invalid escape error.
    #[cold]
    pub fn invalid_escape(pos: Position, escape: u32) -> Self {
        Self::new(pos, LexErrorKind::InvalidEscape { escape })
    }

    /// Create a mismatched or unmatched closing bracket error.
    #[cold]
    pub fn unmatched_bracket(pos: Position, found: char, expected: Option<char>) -> Self {
        Self::new(pos, LexErrorKind::UnmatchedBracket { found, expected })
    }

    /// Create an unclosed brackets error, positioned at the innermost opener.
    #[cold]
    pub fn unbalanced_brackets(pending: Vec<PendingBracket>) -> Self {
        let pos = pending.last().map_or(Position::START, |p| p.pos);
        Self::new(pos, LexErrorKind::UnbalancedBrackets { pending })
    }

    /// Create an oversized source error.
    #[cold]
    pub fn source_too_large() -> Self {
        Self::new(Position::START, LexErrorKind::SourceTooLarge)
    }

    /// Create an unsupported feature error.
    #[cold]
    pub fn unsupported(pos: Position, feature: Unsupported) -> Self {
        Self::new(pos, LexErrorKind::UnsupportedEscape { feature })
    }

    /// Map a cursor failure at `pos`.
    ///
    /// The only control character the cursor refuses is backspace.
    #[cold]
    pub fn from_cursor(pos: Position, err: CursorError) -> Self {
        match err {
            CursorError::InvalidEncoding { source, .. } => Self::invalid_encoding(pos, source),
            CursorError::UnsupportedControl { codepoint: 0x08 } => {
                Self::unsupported(pos, Unsupported::Backspace)
            }
            CursorError::UnsupportedControl { codepoint } => Self::invalid_token(pos, codepoint),
        }
    }
}

#[cfg(test)]
mod tests;
