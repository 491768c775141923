//! Reserved word resolution.
//!
//! The reserved words are `fn if else for while break continue return`.
//! Lookup uses the identifier's length as a first-pass filter (keywords
//! range from 2-8 chars), then matches against the words of that length.
//! The table is a compiled `match`, so it needs no initialization.

use crate::token::Simple;

/// Look up a reserved keyword by text.
///
/// Returns the keyword's [`Simple`] kind, or `None` for an ordinary
/// identifier.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<Simple> {
    match text.len() {
        2 => match text {
            "fn" => Some(Simple::Fn),
            "if" => Some(Simple::If),
            _ => None,
        },
        3 => match text {
            "for" => Some(Simple::For),
            _ => None,
        },
        4 => match text {
            "else" => Some(Simple::Else),
            _ => None,
        },
        5 => match text {
            "while" => Some(Simple::While),
            "break" => Some(Simple::Break),
            _ => None,
        },
        6 => match text {
            "return" => Some(Simple::Return),
            _ => None,
        },
        8 => match text {
            "continue" => Some(Simple::Continue),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests;
