//! Token model.
//!
//! A [`Token`] is a [`TokenKind`] plus the [`Position`] of its first
//! codepoint. Kinds come in four shapes:
//!
//! - [`Simple`]: punctuation, operators, brackets and keywords, whose text
//!   is fixed by the kind
//! - identifiers, carrying their spelling
//! - numeric literals ([`NumberLit`]), tagged with a [`NumericKind`]
//! - string literals, carrying the escape-decoded payload
//!
//! [`TokenList`] owns the output of one tokenizer run.

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;

use karma_lexer_core::Position;

/// Defines [`Simple`] together with its spelling and name tables.
macro_rules! simple_tokens {
    ($($(#[$attr:meta])* $variant:ident => $text:literal,)*) => {
        /// Token kinds whose text is fully determined by the kind.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum Simple {
            $($(#[$attr])* $variant,)*
        }

        impl Simple {
            /// Every simple kind, in declaration order.
            pub const ALL: &'static [Simple] = &[$(Simple::$variant,)*];

            /// Source spelling of the token.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Simple::$variant => $text,)*
                }
            }

            /// Kind name used when printing tokens, e.g. `LeftShiftAssign`.
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(Simple::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

simple_tokens! {
    // === Brackets ===
    LeftBracket => "(",
    RightBracket => ")",
    LeftSquareBracket => "[",
    RightSquareBracket => "]",
    LeftCurlyBracket => "{",
    RightCurlyBracket => "}",

    // === Punctuation ===
    Dot => ".",
    DoubleDot => "..",
    Comma => ",",
    Colon => ":",
    DoubleColon => "::",
    Semicolon => ";",
    Arrow => "->",
    QuestionMark => "?",

    // === Comparison and Logic ===
    Assign => "=",
    Not => "!",
    Less => "<",
    LessEquals => "<=",
    Greater => ">",
    GreaterEquals => ">=",
    Equals => "==",
    NotEquals => "!=",
    Conjunction => "&&",
    Disjunction => "||",

    // === Bitwise ===
    And => "&",
    AndAssign => "&=",
    Or => "|",
    OrAssign => "|=",
    Xor => "^",
    XorAssign => "^=",
    LeftShift => "<<",
    LeftShiftAssign => "<<=",
    RightShift => ">>",
    RightShiftAssign => ">>=",

    // === Arithmetic ===
    Increment => "++",
    Decrement => "--",
    Add => "+",
    AddAssign => "+=",
    Sub => "-",
    SubAssign => "-=",
    Mul => "*",
    MulAssign => "*=",
    Div => "/",
    DivAssign => "/=",
    Mod => "%",
    ModAssign => "%=",

    // === Keywords ===
    Fn => "fn",
    If => "if",
    Else => "else",
    For => "for",
    While => "while",
    Break => "break",
    Continue => "continue",
    Return => "return",
}

impl Simple {
    /// Returns `true` for the reserved words.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Simple::Fn
                | Simple::If
                | Simple::Else
                | Simple::For
                | Simple::While
                | Simple::Break
                | Simple::Continue
                | Simple::Return
        )
    }

    /// For an opening bracket, the closing bracket that matches it.
    pub const fn closer(self) -> Option<Simple> {
        match self {
            Simple::LeftBracket => Some(Simple::RightBracket),
            Simple::LeftSquareBracket => Some(Simple::RightSquareBracket),
            Simple::LeftCurlyBracket => Some(Simple::RightCurlyBracket),
            _ => None,
        }
    }
}

/// Type tag of a numeric literal, chosen by its suffix.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NumericKind {
    I8,
    I16,
    I32,
    I64,
    ISize,
    U8,
    U16,
    U32,
    /// Literals without a recognized suffix.
    #[default]
    U64,
    USize,
    F32,
    F64,
}

impl NumericKind {
    /// Resolve a literal suffix such as `u8` or `isize`.
    ///
    /// Length-bucketed like the keyword table; every suffix is 2-5 bytes.
    pub fn from_suffix(text: &str) -> Option<Self> {
        match text.len() {
            2 => match text {
                "i8" => Some(NumericKind::I8),
                "u8" => Some(NumericKind::U8),
                _ => None,
            },
            3 => match text {
                "i16" => Some(NumericKind::I16),
                "i32" => Some(NumericKind::I32),
                "i64" => Some(NumericKind::I64),
                "u16" => Some(NumericKind::U16),
                "u32" => Some(NumericKind::U32),
                "u64" => Some(NumericKind::U64),
                "f32" => Some(NumericKind::F32),
                "f64" => Some(NumericKind::F64),
                _ => None,
            },
            5 => match text {
                "isize" => Some(NumericKind::ISize),
                "usize" => Some(NumericKind::USize),
                _ => None,
            },
            _ => None,
        }
    }

    /// The suffix spelling for this kind.
    pub const fn suffix(self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::ISize => "isize",
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
            NumericKind::USize => "usize",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    /// Token name used when printing, e.g. `U64Literal`.
    pub const fn display_name(self) -> &'static str {
        match self {
            NumericKind::I8 => "I8Literal",
            NumericKind::I16 => "I16Literal",
            NumericKind::I32 => "I32Literal",
            NumericKind::I64 => "I64Literal",
            NumericKind::ISize => "ISizeLiteral",
            NumericKind::U8 => "U8Literal",
            NumericKind::U16 => "U16Literal",
            NumericKind::U32 => "U32Literal",
            NumericKind::U64 => "U64Literal",
            NumericKind::USize => "USizeLiteral",
            NumericKind::F32 => "F32Literal",
            NumericKind::F64 => "F64Literal",
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    /// Largest literal value of an integer kind; `None` for float kinds.
    ///
    /// Literals carry no sign, so signed kinds top out at their positive
    /// maximum.
    #[allow(
        clippy::cast_sign_loss,
        reason = "all maxima are positive"
    )]
    pub const fn max_value(self) -> Option<u64> {
        match self {
            NumericKind::I8 => Some(i8::MAX as u64),
            NumericKind::I16 => Some(i16::MAX as u64),
            NumericKind::I32 => Some(i32::MAX as u64),
            NumericKind::I64 => Some(i64::MAX as u64),
            NumericKind::ISize => Some(isize::MAX as u64),
            NumericKind::U8 => Some(u8::MAX as u64),
            NumericKind::U16 => Some(u16::MAX as u64),
            NumericKind::U32 => Some(u32::MAX as u64),
            NumericKind::U64 => Some(u64::MAX),
            NumericKind::USize => Some(usize::MAX as u64),
            NumericKind::F32 | NumericKind::F64 => None,
        }
    }
}

/// Decoded numeric literal.
///
/// `bits` holds the integer value for integer kinds and the IEEE-754 bit
/// pattern (`to_bits()`) for float kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NumberLit {
    pub kind: NumericKind,
    pub bits: u64,
}

impl NumberLit {
    /// Build a literal of `kind` from an accumulated value.
    ///
    /// Returns `None` if `value` does not fit an integer kind. Float kinds
    /// convert the value numerically and always succeed.
    #[allow(
        clippy::cast_precision_loss,
        reason = "large literals round to the nearest float, as in a cast"
    )]
    pub fn new(kind: NumericKind, value: u64) -> Option<Self> {
        let bits = match kind {
            NumericKind::F32 => u64::from((value as f32).to_bits()),
            NumericKind::F64 => (value as f64).to_bits(),
            _ => {
                let max = kind.max_value()?;
                if value > max {
                    return None;
                }
                value
            }
        };
        Some(NumberLit { kind, bits })
    }

    /// The value as an `f64`, for float kinds.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "F32 literals only ever store 32-bit patterns"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            NumericKind::F32 => Some(f64::from(f32::from_bits(self.bits as u32))),
            NumericKind::F64 => Some(f64::from_bits(self.bits)),
            _ => None,
        }
    }

    /// Canonical decimal rendering of the value.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "F32 literals only ever store 32-bit patterns"
    )]
    pub fn text(&self) -> String {
        match self.kind {
            NumericKind::F32 => format!("{:?}", f32::from_bits(self.bits as u32)),
            NumericKind::F64 => format!("{:?}", f64::from_bits(self.bits)),
            _ => self.bits.to_string(),
        }
    }
}

/// What a token is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Simple(Simple),
    Ident(Box<str>),
    Number(NumberLit),
    /// Decoded string payload. Holds the source bytes of each character,
    /// which need not be valid UTF-8 for extended codepoints.
    Str(Box<[u8]>),
}

impl TokenKind {
    /// Kind name: the simple kind's name, `Identifier`, `<Kind>Literal` or
    /// `StringLiteral`.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Simple(simple) => simple.display_name(),
            TokenKind::Ident(_) => "Identifier",
            TokenKind::Number(lit) => lit.kind.display_name(),
            TokenKind::Str(_) => "StringLiteral",
        }
    }

    /// Canonical text projection of the token.
    ///
    /// String literals yield their decoded payload, without quotes. Bytes
    /// that are not valid UTF-8 render as U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            TokenKind::Simple(simple) => Cow::Borrowed(simple.as_str()),
            TokenKind::Ident(name) => Cow::Borrowed(&**name),
            TokenKind::Number(lit) => Cow::Owned(lit.text()),
            TokenKind::Str(value) => String::from_utf8_lossy(value),
        }
    }
}

impl From<Simple> for TokenKind {
    fn from(simple: Simple) -> Self {
        TokenKind::Simple(simple)
    }
}

/// A token and where it starts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, pos: Position) -> Self {
        Token { kind, pos }
    }

    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.kind.display_name()
    }

    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.kind.text()
    }
}

/// Renders `[line:column] Name:text` with a 1-based position.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}:{}", self.pos, self.display_name(), self.text())
    }
}

/// Ordered tokens of one source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Get the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Get a slice of all tokens.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate over tokens.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Consume into Vec.
    #[inline]
    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// One token per line.
impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{token}")?;
        }
        Ok(())
    }
}
