//! Text span types for source location tracking.
//!
//! Positions are measured in characters (Unicode scalar values) from the
//! start of the input, which is how the scanner walks its cursor. Use
//! [`byte_offset`] when a byte position is needed, e.g. for slicing or for
//! handing a span to a diagnostic renderer.

use std::fmt;

/// A position in source text, measured as a character index from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The character index where this span starts.
    pub start: TextPos,
    /// The length of this span in characters.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Convert a character index into a [`TextPos`].
///
/// Inputs longer than `u32::MAX` characters are not supported; indices past
/// that saturate at `u32::MAX`.
pub fn text_pos(index: usize) -> TextPos {
    TextPos::try_from(index).unwrap_or(TextPos::MAX)
}

/// Convert a character index into a byte offset within `text`.
///
/// Indices past the end clamp to `text.len()`.
pub fn byte_offset(text: &str, pos: TextPos) -> usize {
    text.char_indices()
        .nth(pos as usize)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column, in characters.
    pub character: u32,
}

/// A map from character indices to line numbers, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Character indices of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(text_pos(i + 1));
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a character index.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and column for a character index.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
        let bounded = TextSpan::from_bounds(2, 9);
        assert_eq!(bounded.length, 7);
        assert_eq!(format!("{:?}", bounded), "2..9");
        assert_eq!(bounded.to_string(), "[2, 9)");
    }

    #[test]
    fn test_text_pos() {
        assert_eq!(text_pos(0), 0);
        assert_eq!(text_pos(70_000), 70_000);
        assert_eq!(text_pos(u32::MAX as usize), u32::MAX);
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("abc", 0), 0);
        assert_eq!(byte_offset("abc", 2), 2);
        assert_eq!(byte_offset("abc", 3), 3);
        assert_eq!(byte_offset("abc", 10), 3);
        // 'é' is two bytes in UTF-8
        assert_eq!(byte_offset("é{1}", 1), 2);
    }

    #[test]
    fn test_line_map() {
        let map = LineMap::new("+>\n[-]\n.");
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(2), 0); // newline char
        assert_eq!(map.line_of(3), 1);
        assert_eq!(map.line_of(7), 2);

        let lc = map.line_and_column_of(5);
        assert_eq!(lc, LineAndColumn { line: 1, character: 2 });
    }

    #[test]
    fn test_line_map_counts_characters() {
        let map = LineMap::new("é\n+");
        assert_eq!(map.line_and_column_of(2), LineAndColumn { line: 1, character: 0 });
    }
}
