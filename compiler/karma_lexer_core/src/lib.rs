//! Low-level source access for the Karma lexer.
//!
//! Three layers, leaves first:
//!
//! - [`utf8`]: pure codec between byte sequences and codepoints, covering
//!   the historical 1-6 byte form of UTF-8.
//! - [`SourceBuffer`]: owned, sentinel-terminated copy of the source text.
//! - [`Cursor`]: codepoint cursor over a [`SourceBuffer`] that tracks a
//!   (line, column) [`Position`] and can step backwards exactly.
//!
//! This crate knows nothing about tokens. `karma_lexer` builds the
//! tokenizer on top of it.

mod cursor;
mod position;
mod source_buffer;
pub mod utf8;

pub use cursor::{Cursor, CursorError, Mark, TAB_WIDTH};
pub use position::Position;
pub use source_buffer::{SourceBuffer, MAX_SOURCE_LEN};
pub use utf8::Utf8Error;
