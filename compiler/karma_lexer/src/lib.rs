//! Tokenizer for the Karma language.
//!
//! Turns source text into a flat [`TokenList`] or the first [`LexError`].
//!
//! # Architecture
//!
//! - `karma_lexer_core` decodes codepoints and tracks line/column, with
//!   exact backward steps for operator lookahead.
//! - [`Tokenizer`] drives the cursor: identifiers and keywords, brackets,
//!   operators, strings, comments and prefixed numeric literals.
//!
//! # Usage
//!
//! ```
//! use karma_lexer::{tokenize_str, Simple, TokenKind};
//!
//! let tokens = tokenize_str("fn main() {}").unwrap_or_default();
//! assert_eq!(tokens[0].kind, TokenKind::Simple(Simple::Fn));
//! assert_eq!(tokens.len(), 6);
//! ```

mod atom;
mod escape;
mod keywords;
mod lex_error;
mod number;
mod token;
mod tokenizer;

use std::sync::Once;

use tracing::debug;

pub use karma_lexer_core::{Position, SourceBuffer, Utf8Error, MAX_SOURCE_LEN};
pub use lex_error::{LexError, LexErrorKind, LiteralProblem, PendingBracket, Unsupported};
pub use number::Radix;
pub use token::{NumberLit, NumericKind, Simple, Token, TokenKind, TokenList};
pub use tokenizer::Tokenizer;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=karma_lexer=debug` or `RUST_LOG=karma_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Tokenize a source buffer.
///
/// Returns every token in source order, or the first error. On success
/// all brackets are balanced. Sources longer than [`MAX_SOURCE_LEN`] bytes
/// fail with [`LexErrorKind::SourceTooLarge`].
#[tracing::instrument(level = "debug", skip_all, fields(len = buf.len()))]
pub fn tokenize(buf: &SourceBuffer) -> Result<TokenList, LexError> {
    let result = Tokenizer::new(buf).run();
    match &result {
        Ok(tokens) => debug!(count = tokens.len(), "tokenized"),
        Err(err) => debug!(error = %err, "tokenize failed"),
    }
    result
}

/// Tokenize source text.
pub fn tokenize_str(source: &str) -> Result<TokenList, LexError> {
    tokenize(&SourceBuffer::new(source))
}
