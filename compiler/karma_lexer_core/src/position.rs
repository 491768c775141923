use std::fmt;

/// Zero-based (line, column) location of a codepoint in the source.
///
/// `column` counts codepoints since the last line break, with a tab
/// counting as [`TAB_WIDTH`](crate::TAB_WIDTH) columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The first codepoint of the source.
    pub const START: Position = Position { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Renders the 1-based `line:column` form used in diagnostics.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based() {
        assert_eq!(Position::START.to_string(), "1:1");
        assert_eq!(Position::new(4, 10).to_string(), "5:11");
    }

    #[test]
    fn orders_by_line_then_column() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
    }
}
