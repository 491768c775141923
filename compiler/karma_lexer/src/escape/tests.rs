use super::*;
use crate::lex_error::LexErrorKind;
use pretty_assertions::assert_eq;

fn resolve_char(c: char) -> Result<char, LexError> {
    resolve(u32::from(c), Position::START)
}

// === Valid escapes ===

#[test]
fn table_escapes() {
    let table = [
        ('"', '"'),
        ('\'', '\''),
        ('0', '\0'),
        ('b', '\x08'),
        ('f', '\x0C'),
        ('n', '\n'),
        ('r', '\r'),
        ('t', '\t'),
        ('v', '\x0B'),
        ('\\', '\\'),
    ];
    for (escape, expected) in table {
        assert_eq!(resolve_char(escape), Ok(expected), "escape \\{escape}");
    }
}

// === Rejected escapes ===

#[test]
fn unicode_escape_is_unsupported() {
    let err = resolve_char('u').map_err(|e| e.kind);
    assert_eq!(
        err,
        Err(LexErrorKind::UnsupportedEscape {
            feature: Unsupported::UnicodeEscape
        })
    );
}

#[test]
fn unknown_escapes_are_invalid() {
    for escape in ['q', 'x', 'a', 'e', '1', ' ', '\u{E9}'] {
        let err = resolve_char(escape).map_err(|e| e.kind);
        assert_eq!(
            err,
            Err(LexErrorKind::InvalidEscape {
                escape: u32::from(escape)
            })
        );
    }
}

#[test]
fn error_carries_backslash_position() {
    let pos = Position::new(2, 8);
    assert_eq!(resolve(u32::from('q'), pos).map_err(|e| e.pos), Err(pos));
}
