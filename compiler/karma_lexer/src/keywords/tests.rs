use super::*;

// === Reserved keyword tests ===

#[test]
fn control_flow_keywords() {
    assert_eq!(lookup("if"), Some(Simple::If));
    assert_eq!(lookup("else"), Some(Simple::Else));
    assert_eq!(lookup("for"), Some(Simple::For));
    assert_eq!(lookup("while"), Some(Simple::While));
    assert_eq!(lookup("break"), Some(Simple::Break));
    assert_eq!(lookup("continue"), Some(Simple::Continue));
    assert_eq!(lookup("return"), Some(Simple::Return));
}

#[test]
fn declaration_keywords() {
    assert_eq!(lookup("fn"), Some(Simple::Fn));
}

#[test]
fn every_keyword_kind_round_trips() {
    for &simple in Simple::ALL.iter().filter(|s| s.is_keyword()) {
        assert_eq!(lookup(simple.as_str()), Some(simple));
    }
}

// === Non-keyword tests ===

#[test]
fn identifiers_are_not_keywords() {
    for text in ["iffy", "f", "fnord", "If", "FN", "return_", "_if", "whiles", ""] {
        assert_eq!(lookup(text), None, "{text:?} should be an identifier");
    }
}

#[test]
fn operators_are_not_keywords() {
    assert_eq!(lookup("<<="), None);
    assert_eq!(lookup("->"), None);
}
