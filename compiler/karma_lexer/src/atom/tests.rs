use super::*;
use karma_lexer_core::{Position, SourceBuffer};
use pretty_assertions::assert_eq;

/// Consume the leading character of `source`, then resolve with `table`.
fn resolve_with(source: &str, table: &OperatorTable) -> (Simple, u32) {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    if let Err(err) = cursor.advance() {
        panic!("leading character failed: {err}");
    }
    match resolve_operator(&mut cursor, table) {
        Ok(kind) => (kind, cursor.pos()),
        Err(err) => panic!("resolve failed for {source:?}: {err}"),
    }
}

fn operator_table(c: char) -> &'static OperatorTable {
    match classify(u32::from(c)) {
        Some(Atom::Operator(table)) => table,
        Some(Atom::Slash) => &SLASH,
        other => panic!("{c:?} is not an operator: {other:?}"),
    }
}

fn resolve_str(source: &str) -> (Simple, u32) {
    let lead = source.chars().next().unwrap_or('\0');
    resolve_with(source, operator_table(lead))
}

// === Classification ===

#[test]
fn brackets_classify_with_closers() {
    assert!(matches!(
        classify(u32::from('(')),
        Some(Atom::Open {
            kind: Simple::LeftBracket,
            open: '(',
            closer: ')'
        })
    ));
    assert!(matches!(
        classify(u32::from('}')),
        Some(Atom::Close {
            kind: Simple::RightCurlyBracket,
            ch: '}'
        })
    ));
}

#[test]
fn dispatch_misses() {
    for c in ['a', '1', '@', '#', '$', '`', '~', '\\', '\u{E9}'] {
        assert!(classify(u32::from(c)).is_none(), "{c:?}");
    }
    assert!(classify(0x7FFF_FFFF).is_none());
}

// === Greedy Resolution ===

#[test]
fn single_character_operators() {
    assert_eq!(resolve_str("<"), (Simple::Less, 1));
    assert_eq!(resolve_str("- x"), (Simple::Sub, 1));
    assert_eq!(resolve_str(","), (Simple::Comma, 1));
    assert_eq!(resolve_str("?"), (Simple::QuestionMark, 1));
}

#[test]
fn longest_match_wins() {
    assert_eq!(resolve_str("<<="), (Simple::LeftShiftAssign, 3));
    assert_eq!(resolve_str("<<"), (Simple::LeftShift, 2));
    assert_eq!(resolve_str("<="), (Simple::LessEquals, 2));
    assert_eq!(resolve_str(">>="), (Simple::RightShiftAssign, 3));
    assert_eq!(resolve_str("->"), (Simple::Arrow, 2));
    assert_eq!(resolve_str("--"), (Simple::Decrement, 2));
    assert_eq!(resolve_str("::"), (Simple::DoubleColon, 2));
    assert_eq!(resolve_str(".."), (Simple::DoubleDot, 2));
    assert_eq!(resolve_str("&&"), (Simple::Conjunction, 2));
    assert_eq!(resolve_str("||"), (Simple::Disjunction, 2));
    assert_eq!(resolve_str("/="), (Simple::DivAssign, 2));
}

#[test]
fn stops_after_longest_extension() {
    // `<<=<` is `<<=` followed by `<`.
    assert_eq!(resolve_str("<<=<"), (Simple::LeftShiftAssign, 3));
    // `...` is `..` followed by `.`.
    assert_eq!(resolve_str("..."), (Simple::DoubleDot, 2));
    // `<<<` is `<<` followed by `<`.
    assert_eq!(resolve_str("<<<"), (Simple::LeftShift, 2));
}

#[test]
fn every_compound_operator_resolves() {
    for &simple in Simple::ALL {
        let text = simple.as_str();
        let Some(lead) = text.chars().next() else {
            continue;
        };
        if simple.is_keyword() || !matches!(classify(u32::from(lead)), Some(Atom::Operator(_) | Atom::Slash)) {
            continue;
        }
        assert_eq!(
            resolve_str(text),
            (simple, text.len() as u32),
            "spelling {text:?}"
        );
    }
}

#[test]
fn retreats_over_incomplete_prefix() {
    // Only `<<=` extends `<` here, so `<<` is an incomplete prefix.
    static SPARSE: OperatorTable = operators!(Less, "<=" => LeftShiftAssign);
    let buf = SourceBuffer::new("<<x");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.advance(), Ok(u32::from('<')));
    assert_eq!(resolve_operator(&mut cursor, &SPARSE), Ok(Simple::Less));
    assert_eq!(cursor.pos(), 1);
    assert_eq!(cursor.position(), Position::new(0, 1));
    assert_eq!(cursor.peek(), Ok(u32::from('<')));
}

#[test]
fn incomplete_prefix_at_end_of_input() {
    static SPARSE: OperatorTable = operators!(Less, "<=" => LeftShiftAssign);
    assert_eq!(resolve_with("<<", &SPARSE), (Simple::Less, 1));
    assert_eq!(resolve_with("<<=", &SPARSE), (Simple::LeftShiftAssign, 3));
}

#[test]
fn non_ascii_follower_ends_operator() {
    assert_eq!(resolve_str("<\u{E9}"), (Simple::Less, 1));
}
