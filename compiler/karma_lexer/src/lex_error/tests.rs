use super::*;
use pretty_assertions::assert_eq;

#[test]
fn error_construction() {
    let pos = Position::new(3, 7);
    let err = LexError::unterminated_string(pos);
    assert_eq!(err.pos, pos);
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn display_is_one_based_position_then_message() {
    let err = LexError::invalid_token(Position::new(0, 4), u32::from('@'));
    assert_eq!(err.to_string(), "1:5: unexpected character '@'");
}

#[test]
fn control_codepoints_render_as_hex() {
    let err = LexError::invalid_token(Position::START, 0);
    assert_eq!(err.to_string(), "1:1: unexpected character U+0000");
}

#[test]
fn literal_messages() {
    let err = LexError::invalid_literal(
        Position::START,
        Radix::Binary,
        LiteralProblem::TooManyDigits { count: 65, max: 64 },
    );
    assert_eq!(
        err.kind.to_string(),
        "invalid binary literal: 65 digits, at most 64 allowed"
    );
    let err = LexError::invalid_literal(
        Position::START,
        Radix::Hex,
        LiteralProblem::OutOfRange {
            kind: NumericKind::U8,
        },
    );
    assert_eq!(
        err.kind.to_string(),
        "invalid hexadecimal literal: value out of range for `u8`"
    );
}

#[test]
fn escape_message() {
    let err = LexError::invalid_escape(Position::START, u32::from('q'));
    assert_eq!(err.kind.to_string(), "invalid escape sequence `\\q`");
}

#[test]
fn bracket_messages() {
    let err = LexError::unmatched_bracket(Position::START, ')', None);
    assert_eq!(err.kind.to_string(), "unmatched closing bracket `)`");
    let err = LexError::unmatched_bracket(Position::START, ')', Some(']'));
    assert_eq!(
        err.kind.to_string(),
        "mismatched bracket: expected `]`, found `)`"
    );
}

#[test]
fn unbalanced_is_positioned_at_innermost() {
    let pending = vec![
        PendingBracket {
            open: '(',
            pos: Position::new(0, 0),
        },
        PendingBracket {
            open: '{',
            pos: Position::new(1, 2),
        },
    ];
    let err = LexError::unbalanced_brackets(pending);
    assert_eq!(err.pos, Position::new(1, 2));
    assert_eq!(
        err.to_string(),
        "2:3: unclosed bracket(s): `(` at 1:1, `{` at 2:3"
    );
}

#[test]
fn cursor_errors_map_to_kinds() {
    let pos = Position::new(0, 1);
    let err = LexError::from_cursor(pos, CursorError::UnsupportedControl { codepoint: 0x08 });
    assert_eq!(
        err.kind,
        LexErrorKind::UnsupportedEscape {
            feature: Unsupported::Backspace
        }
    );
    let err = LexError::from_cursor(
        pos,
        CursorError::InvalidEncoding {
            offset: 1,
            source: Utf8Error::InvalidLeadByte { byte: 0xFF },
        },
    );
    assert_eq!(
        err.kind,
        LexErrorKind::InvalidEncoding(Utf8Error::InvalidLeadByte { byte: 0xFF })
    );
    assert_eq!(err.pos, pos);
}

#[test]
fn error_equality() {
    let a = LexError::unterminated_comment(Position::new(0, 5));
    let b = LexError::unterminated_comment(Position::new(0, 5));
    let c = LexError::unterminated_string(Position::new(0, 5));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn oversized_source_message() {
    let err = LexError::source_too_large();
    assert_eq!(err.pos, Position::START);
    assert_eq!(err.kind, LexErrorKind::SourceTooLarge);
    assert_eq!(
        err.to_string(),
        format!("1:1: source exceeds {MAX_SOURCE_LEN} bytes")
    );
}
