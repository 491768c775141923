//! Single-character dispatch: brackets, operators, quotes, slashes.
//!
//! Every operator starts with a fixed character whose [`OperatorTable`]
//! lists the spellings it can extend to. [`resolve_operator`] picks the
//! longest one present in the input.
//!
//! # Greedy Resolution
//!
//! After the leading character, the scanner consumes characters while the
//! consumed run is still a prefix of some extension, up to the longest
//! tail in the table. It then steps back over any trailing characters that
//! do not complete an extension and emits the longest complete match, or
//! the table's base token if none completed.

use karma_lexer_core::Cursor;
use smallvec::SmallVec;

use crate::lex_error::LexError;
use crate::token::Simple;

/// Characters that may follow a leading operator character.
#[derive(Debug)]
pub(crate) struct Extension {
    /// Characters after the leading one (ASCII).
    pub tail: &'static str,
    pub kind: Simple,
}

/// Operators sharing a leading character.
#[derive(Debug)]
pub(crate) struct OperatorTable {
    /// Token for the leading character alone.
    pub base: Simple,
    pub extensions: &'static [Extension],
}

impl OperatorTable {
    fn max_tail_len(&self) -> usize {
        self.extensions
            .iter()
            .map(|ext| ext.tail.len())
            .max()
            .unwrap_or(0)
    }

    fn extends(&self, run: &[u8]) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.tail.as_bytes().starts_with(run))
    }

    fn complete(&self, run: &[u8]) -> Option<Simple> {
        self.extensions
            .iter()
            .find(|ext| ext.tail.as_bytes() == run)
            .map(|ext| ext.kind)
    }
}

/// Builds an [`OperatorTable`] literal: `operators!(Base, "tail" => Kind, ...)`.
macro_rules! operators {
    ($base:ident $(, $tail:literal => $kind:ident)* $(,)?) => {
        OperatorTable {
            base: Simple::$base,
            extensions: &[$(Extension { tail: $tail, kind: Simple::$kind }),*],
        }
    };
}

static DOT: OperatorTable = operators!(Dot, "." => DoubleDot);
static COMMA: OperatorTable = operators!(Comma);
static COLON: OperatorTable = operators!(Colon, ":" => DoubleColon);
static SEMICOLON: OperatorTable = operators!(Semicolon);
static QUESTION: OperatorTable = operators!(QuestionMark);
static ASSIGN: OperatorTable = operators!(Assign, "=" => Equals);
static NOT: OperatorTable = operators!(Not, "=" => NotEquals);
static LESS: OperatorTable = operators!(
    Less,
    "<" => LeftShift,
    "<=" => LeftShiftAssign,
    "=" => LessEquals,
);
static GREATER: OperatorTable = operators!(
    Greater,
    ">" => RightShift,
    ">=" => RightShiftAssign,
    "=" => GreaterEquals,
);
static AND: OperatorTable = operators!(And, "&" => Conjunction, "=" => AndAssign);
static OR: OperatorTable = operators!(Or, "|" => Disjunction, "=" => OrAssign);
static XOR: OperatorTable = operators!(Xor, "=" => XorAssign);
static ADD: OperatorTable = operators!(Add, "+" => Increment, "=" => AddAssign);
static SUB: OperatorTable = operators!(
    Sub,
    "-" => Decrement,
    "=" => SubAssign,
    ">" => Arrow,
);
static MUL: OperatorTable = operators!(Mul, "=" => MulAssign);
static MOD: OperatorTable = operators!(Mod, "=" => ModAssign);

/// `/` once comments have been ruled out.
pub(crate) static SLASH: OperatorTable = operators!(Div, "=" => DivAssign);

/// What a leading character starts.
#[derive(Debug)]
pub(crate) enum Atom {
    /// An opening bracket and the closer it expects.
    Open {
        kind: Simple,
        open: char,
        closer: char,
    },
    /// A closing bracket.
    Close { kind: Simple, ch: char },
    Operator(&'static OperatorTable),
    /// `"`: a string literal.
    Quote,
    /// `/`: a comment or division.
    Slash,
}

/// Classify a leading character; `None` is a dispatch miss.
pub(crate) fn classify(c: u32) -> Option<Atom> {
    let c = char::from_u32(c)?;
    let atom = match c {
        '(' => Atom::Open {
            kind: Simple::LeftBracket,
            open: '(',
            closer: ')',
        },
        '[' => Atom::Open {
            kind: Simple::LeftSquareBracket,
            open: '[',
            closer: ']',
        },
        '{' => Atom::Open {
            kind: Simple::LeftCurlyBracket,
            open: '{',
            closer: '}',
        },
        ')' => Atom::Close {
            kind: Simple::RightBracket,
            ch: ')',
        },
        ']' => Atom::Close {
            kind: Simple::RightSquareBracket,
            ch: ']',
        },
        '}' => Atom::Close {
            kind: Simple::RightCurlyBracket,
            ch: '}',
        },
        '"' => Atom::Quote,
        '/' => Atom::Slash,
        '.' => Atom::Operator(&DOT),
        ',' => Atom::Operator(&COMMA),
        ':' => Atom::Operator(&COLON),
        ';' => Atom::Operator(&SEMICOLON),
        '?' => Atom::Operator(&QUESTION),
        '=' => Atom::Operator(&ASSIGN),
        '!' => Atom::Operator(&NOT),
        '<' => Atom::Operator(&LESS),
        '>' => Atom::Operator(&GREATER),
        '&' => Atom::Operator(&AND),
        '|' => Atom::Operator(&OR),
        '^' => Atom::Operator(&XOR),
        '+' => Atom::Operator(&ADD),
        '-' => Atom::Operator(&SUB),
        '*' => Atom::Operator(&MUL),
        '%' => Atom::Operator(&MOD),
        _ => return None,
    };
    Some(atom)
}

/// Resolve the operator whose leading character the cursor just consumed.
///
/// Leaves the cursor after the chosen spelling.
pub(crate) fn resolve_operator(
    cursor: &mut Cursor<'_>,
    table: &OperatorTable,
) -> Result<Simple, LexError> {
    let max = table.max_tail_len();
    let mut run: SmallVec<[u8; 4]> = SmallVec::new();
    let mut best = table.base;
    let mut best_len = 0;

    while run.len() < max && !cursor.is_eof() {
        let c = cursor
            .peek()
            .map_err(|e| LexError::from_cursor(cursor.position(), e))?;
        // Tails are ASCII.
        let Ok(byte) = u8::try_from(c) else {
            break;
        };
        run.push(byte);
        if !table.extends(&run) {
            run.pop();
            break;
        }
        cursor
            .advance()
            .map_err(|e| LexError::from_cursor(cursor.position(), e))?;
        if let Some(kind) = table.complete(&run) {
            best = kind;
            best_len = run.len();
        }
    }

    for _ in best_len..run.len() {
        cursor.retreat();
    }
    Ok(best)
}

#[cfg(test)]
mod tests;
