//! This module defines data structures that mark spans of text in the normalized solver output.

use std::ops::Range;

use nom_locate::LocatedSpan;

/// Input to a nom parser function
pub type ParserInput<'a> = LocatedSpan<&'a str>;

/// Locates a certain character within the input,
/// giving its offset, line and column number
#[derive(Debug, Clone, Copy, Default, Eq)]
pub struct CharacterPosition {
    /// Index of the character in the input
    pub offset: usize,
    /// Line where the character occurs (starting with 1)
    pub line: u32,
    /// Column where the character occurs (starting with 1)
    pub column: u32,
}

impl CharacterPosition {
    /// Return the position at the start of the given input.
    pub fn of(input: &ParserInput<'_>) -> Self {
        Self {
            offset: input.location_offset(),
            line: input.location_line(),
            column: u32::try_from(input.get_utf8_column()).unwrap_or(u32::MAX),
        }
    }

    /// Return a one character range at this position
    pub fn range(&self) -> Range<usize> {
        self.offset..(self.offset + 1)
    }
}

impl PartialEq for CharacterPosition {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl PartialOrd for CharacterPosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharacterPosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl std::fmt::Display for CharacterPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Describes a region of text with [CharacterPosition]s
#[derive(Debug, Clone, Copy)]
pub struct CharacterRange {
    /// Start position
    pub start: CharacterPosition,
    /// End position
    pub end: CharacterPosition,
}

impl CharacterRange {
    /// Return this information as a [Range].
    pub fn range(&self) -> Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// Maker for a region of text within a string slice
#[derive(Debug, Clone, Copy)]
pub struct Span<'a>(pub(crate) LocatedSpan<&'a str>);

impl<'a> From<LocatedSpan<&'a str>> for Span<'a> {
    fn from(value: LocatedSpan<&'a str>) -> Self {
        Self(value)
    }
}

impl<'a> Span<'a> {
    /// Return the text covered by this span.
    pub fn fragment(&self) -> &'a str {
        self.0.fragment()
    }

    /// Line where this span starts (starting with 1)
    pub fn location_line(&self) -> u32 {
        self.0.location_line()
    }

    /// Column where this span starts (starting with 1)
    pub fn get_utf8_column(&self) -> usize {
        self.0.get_utf8_column()
    }

    /// Compute the [CharacterRange] for this region of text.
    pub fn range(&self) -> CharacterRange {
        let start = CharacterPosition::of(&self.0);

        let fragment = self.0.fragment();
        let line_count = fragment.lines().count().max(1);
        let end_line = start.line + u32::try_from(line_count - 1).unwrap_or(0);
        let end_column = match fragment.lines().last() {
            Some(last) if line_count > 1 => 1 + last.chars().count(),
            _ => start.column as usize + fragment.chars().count(),
        };

        let end = CharacterPosition {
            offset: start.offset + fragment.len(),
            line: end_line,
            column: u32::try_from(end_column).unwrap_or(u32::MAX),
        };

        CharacterRange { start, end }
    }
}
