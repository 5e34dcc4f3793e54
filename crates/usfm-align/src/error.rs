/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for USFM parsing with source locations.

use std::fmt;
use thiserror::Error;

/// Result type alias for usfm-align operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A position in the source document.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Compute the line and column of a byte offset in `source`.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        SourceLocation {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// What went wrong while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A `\zaln-s` milestone was still open at a verse/chapter boundary or at end of input.
    #[error("unterminated alignment: \\zaln-s opened at {opened} is never closed")]
    UnterminatedAlignment { opened: SourceLocation },

    /// A `\zaln-e\*` with no open `\zaln-s`.
    #[error("\\zaln-e without a matching \\zaln-s")]
    UnmatchedAlignmentEnd,

    /// A `\w` word with no closing `\w*`.
    #[error("unterminated word: missing \\{marker}*")]
    UnterminatedWord { marker: String },

    /// A milestone whose attribute list never reaches `\*`.
    #[error("unterminated milestone \\{marker}: missing \\*")]
    UnterminatedMilestone { marker: String },

    /// A footnote or cross reference with no closing marker.
    #[error("unterminated note: missing \\{marker}*")]
    UnterminatedNote { marker: String },

    /// A `\v` marker before the first `\c`.
    #[error("verse marker before any chapter marker")]
    VerseOutsideChapter,

    /// A chapter number that does not increase.
    #[error("chapter {found} out of order (after chapter {previous})")]
    ChapterOutOfOrder { previous: u32, found: u32 },

    /// A verse number that does not increase within its chapter.
    #[error("verse {found} out of order in chapter {chapter} (after verse {previous})")]
    VerseOutOfOrder {
        chapter: u32,
        previous: u32,
        found: u32,
    },

    /// A `\c` or `\v` marker not followed by a usable number.
    #[error("invalid {marker} number: {value:?}")]
    InvalidNumber { marker: &'static str, value: String },
}

/// A fatal error parsing a USFM document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {location}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub(crate) fn at(source: &str, offset: usize, kind: ParseErrorKind) -> Self {
        ParseError {
            kind,
            location: SourceLocation::from_offset(source, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_first_line() {
        let loc = SourceLocation::from_offset("abc", 1);
        assert_eq!((loc.line, loc.column), (1, 2));
    }

    #[test]
    fn test_location_counts_chars_not_bytes() {
        let source = "\\c 1\n\\v 1 \u{1f10}\u{3bd} arch";
        let offset = source.find("arch").unwrap();
        let loc = SourceLocation::from_offset(source, offset);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 9);
    }

    #[test]
    fn test_location_clamps_past_end() {
        let loc = SourceLocation::from_offset("a\nb", 99);
        assert_eq!(loc.offset, 3);
        assert_eq!((loc.line, loc.column), (2, 2));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::at(
            "\\c 2\n\\c 1",
            5,
            ParseErrorKind::ChapterOutOfOrder {
                previous: 2,
                found: 1,
            },
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"chapter 1 out of order (after chapter 2) at line 2, column 1"
        );
    }
}
