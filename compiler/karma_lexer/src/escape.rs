//! String escape table.
//!
//! Valid escapes: `\"` `\'` `\0` `\b` `\f` `\n` `\r` `\t` `\v` `\\`.
//! `\u` is recognized and rejected as unsupported; anything else is an
//! invalid escape.

use karma_lexer_core::Position;

use crate::lex_error::{LexError, Unsupported};

/// Resolve the character after a `\` to the character it stands for.
///
/// `pos` is the position of the backslash, used for errors.
#[inline]
pub(crate) fn resolve(escape: u32, pos: Position) -> Result<char, LexError> {
    let Some(c) = char::from_u32(escape) else {
        return Err(LexError::invalid_escape(pos, escape));
    };
    match c {
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '0' => Ok('\0'),
        'b' => Ok('\x08'),
        'f' => Ok('\x0C'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        'v' => Ok('\x0B'),
        '\\' => Ok('\\'),
        'u' => Err(LexError::unsupported(pos, Unsupported::UnicodeEscape)),
        _ => Err(LexError::invalid_escape(pos, escape)),
    }
}

#[cfg(test)]
mod tests;
