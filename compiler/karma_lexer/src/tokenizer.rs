//! The tokenizer state machine.
//!
//! One left-to-right pass over a [`SourceBuffer`]. Each step skips
//! whitespace, then dispatches on the codepoint under the cursor:
//!
//! 1. identifier start: identifier or keyword
//! 2. an atom ([`classify`]): bracket, operator, string, comment or `/`
//! 3. an ASCII digit: prefixed numeric literal
//! 4. anything else: [`LexError::invalid_token`]
//!
//! Brackets are checked as they are seen. Openers still pending at end of
//! input are reported together.

use karma_lexer_core::{Cursor, Position, SourceBuffer};
use smallvec::SmallVec;
use tracing::trace;

use crate::atom::{classify, resolve_operator, Atom, SLASH};
use crate::escape;
use crate::keywords;
use crate::lex_error::{LexError, PendingBracket, Unsupported};
use crate::number;
use crate::token::{Token, TokenKind, TokenList};

const BACKSPACE: u32 = 0x08;
const LF: u32 = 0x0A;
const QUOTE: u32 = 0x22;
const BACKSLASH: u32 = 0x5C;

/// Returns `true` if `c` can start an identifier (ASCII letter or `_`).
#[inline]
pub(crate) fn is_ident_start(c: u32) -> bool {
    u8::try_from(c).is_ok_and(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// Returns `true` if `c` can continue an identifier.
#[inline]
pub(crate) fn is_ident_continue(c: u32) -> bool {
    u8::try_from(c).is_ok_and(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[inline]
fn is_whitespace(c: u32) -> bool {
    matches!(c, 0x20 | 0x09 | 0x0A | 0x0D)
}

/// An opener waiting for its closer.
#[derive(Clone, Copy, Debug)]
struct Pending {
    open: char,
    closer: char,
    pos: Position,
}

/// Tokenizer over one source buffer.
///
/// Consumed by [`run`](Self::run); a tokenizer lexes exactly one source.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    brackets: SmallVec<[Pending; 16]>,
    tokens: TokenList,
    oversized: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buf: &'a SourceBuffer) -> Self {
        Tokenizer {
            cursor: buf.cursor(),
            brackets: SmallVec::new(),
            tokens: TokenList::new(),
            oversized: buf.is_oversized(),
        }
    }

    /// Tokenize the whole source, stopping at the first error.
    ///
    /// A source longer than [`MAX_SOURCE_LEN`](karma_lexer_core::MAX_SOURCE_LEN)
    /// fails up front rather than tokenizing only its addressable prefix.
    pub fn run(mut self) -> Result<TokenList, LexError> {
        if self.oversized {
            return Err(LexError::source_too_large());
        }
        while self.skip_whitespace()? {
            self.next_token()?;
        }
        if !self.brackets.is_empty() {
            let pending = self
                .brackets
                .iter()
                .map(|p| PendingBracket {
                    open: p.open,
                    pos: p.pos,
                })
                .collect();
            return Err(LexError::unbalanced_brackets(pending));
        }
        Ok(self.tokens)
    }

    /// Skip whitespace; returns `true` if input remains.
    fn skip_whitespace(&mut self) -> Result<bool, LexError> {
        while !self.cursor.is_eof() {
            let c = self.peek()?;
            if c == BACKSPACE {
                return Err(LexError::unsupported(
                    self.cursor.position(),
                    Unsupported::Backspace,
                ));
            }
            if !is_whitespace(c) {
                return Ok(true);
            }
            self.advance()?;
        }
        Ok(false)
    }

    fn next_token(&mut self) -> Result<(), LexError> {
        let pos = self.cursor.position();
        let c = self.peek()?;

        if is_ident_start(c) {
            return self.identifier(pos);
        }
        if let Some(atom) = classify(c) {
            return self.atom(atom, pos);
        }
        if u8::try_from(c).is_ok_and(|b| b.is_ascii_digit()) {
            let lit = number::scan(&mut self.cursor)?;
            self.emit(TokenKind::Number(lit), pos);
            return Ok(());
        }
        Err(LexError::invalid_token(pos, c))
    }

    fn identifier(&mut self, pos: Position) -> Result<(), LexError> {
        let start = self.cursor.pos();
        self.cursor
            .eat_while(is_ident_continue)
            .map_err(|e| LexError::from_cursor(self.cursor.position(), e))?;
        // Identifier characters are ASCII.
        let text = String::from_utf8_lossy(self.cursor.slice(start, self.cursor.pos()));
        let kind = match keywords::lookup(&text) {
            Some(keyword) => TokenKind::Simple(keyword),
            None => TokenKind::Ident(text.into()),
        };
        self.emit(kind, pos);
        Ok(())
    }

    fn atom(&mut self, atom: Atom, pos: Position) -> Result<(), LexError> {
        match atom {
            Atom::Open { kind, open, closer } => {
                self.advance()?;
                trace!(%pos, open = %open, depth = self.brackets.len() + 1, "bracket push");
                self.brackets.push(Pending { open, closer, pos });
                self.emit(kind.into(), pos);
            }
            Atom::Close { kind, ch } => {
                self.advance()?;
                match self.brackets.pop() {
                    Some(pending) if pending.closer == ch => {
                        trace!(%pos, close = %ch, depth = self.brackets.len(), "bracket pop");
                    }
                    Some(pending) => {
                        return Err(LexError::unmatched_bracket(pos, ch, Some(pending.closer)));
                    }
                    None => return Err(LexError::unmatched_bracket(pos, ch, None)),
                }
                self.emit(kind.into(), pos);
            }
            Atom::Operator(table) => {
                self.advance()?;
                let kind = resolve_operator(&mut self.cursor, table)?;
                self.emit(kind.into(), pos);
            }
            Atom::Quote => self.string(pos)?,
            Atom::Slash => self.slash(pos)?,
        }
        Ok(())
    }

    /// `/`, `/=`, `//` line comment or `/*` block comment.
    fn slash(&mut self, pos: Position) -> Result<(), LexError> {
        self.advance()?;
        match char::from_u32(self.peek()?) {
            Some('/') => {
                self.cursor
                    .eat_while(|c| c != LF)
                    .map_err(|e| LexError::from_cursor(self.cursor.position(), e))?;
            }
            Some('*') => {
                self.advance()?;
                self.block_comment(pos)?;
            }
            _ => {
                let kind = resolve_operator(&mut self.cursor, &SLASH)?;
                self.emit(kind.into(), pos);
            }
        }
        Ok(())
    }

    /// Skip a nested block comment whose `/*` (at `start`) was just consumed.
    fn block_comment(&mut self, start: Position) -> Result<(), LexError> {
        let mut depth: u32 = 1;
        while !self.cursor.is_eof() {
            let c = self.advance()?;
            let next = self.peek()?;
            if c == u32::from('/') && next == u32::from('*') {
                self.advance()?;
                depth += 1;
            } else if c == u32::from('*') && next == u32::from('/') {
                self.advance()?;
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(LexError::unterminated_comment(start))
    }

    /// Scan a string literal; the cursor is on the opening quote at `start`.
    ///
    /// Characters other than escapes are copied byte for byte, so the
    /// payload keeps any codepoint the codec decodes, including surrogates
    /// and the 5- and 6-byte forms.
    fn string(&mut self, start: Position) -> Result<(), LexError> {
        self.advance()?;
        let mut payload: Vec<u8> = Vec::new();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::unterminated_string(start));
            }
            let here = self.cursor.position();
            let offset = self.cursor.pos();
            let c = self.advance()?;
            if c == QUOTE {
                break;
            }
            if c == BACKSLASH {
                if self.cursor.is_eof() {
                    return Err(LexError::unterminated_string(start));
                }
                let escape = self.advance()?;
                let ch = escape::resolve(escape, here)?;
                payload.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
            } else {
                payload.extend_from_slice(self.cursor.slice(offset, self.cursor.pos()));
            }
        }
        self.emit(TokenKind::Str(payload.into_boxed_slice()), start);
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, pos: Position) {
        trace!(%pos, kind = kind.display_name(), text = %kind.text(), "token");
        self.tokens.push(Token::new(kind, pos));
    }

    fn peek(&self) -> Result<u32, LexError> {
        self.cursor
            .peek()
            .map_err(|e| LexError::from_cursor(self.cursor.position(), e))
    }

    fn advance(&mut self) -> Result<u32, LexError> {
        self.cursor
            .advance()
            .map_err(|e| LexError::from_cursor(self.cursor.position(), e))
    }
}
