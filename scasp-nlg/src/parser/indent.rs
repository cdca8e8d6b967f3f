//! This module defines [IndentNormalizer],
//! which makes the nesting of justification trees explicit.
//!
//! The solver expresses nesting only through leading spaces.
//! The normalizer inserts a line containing [INDENT_MARKER]
//! wherever the indentation increases and one [DEDENT_MARKER]
//! for every level that is closed, so that the grammar can match
//! nested blocks without tracking columns.

use thiserror::Error;

pub use super::ast::token::{DEDENT_MARKER, INDENT_MARKER};

/// Lines starting with this header always count as unindented
const ANSWER_HEADER: &str = "ANSWER:";

/// Error that occurs during indentation normalization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// Indentation decreased to a width that was never opened
    #[error("line {line}: indentation of {width} spaces does not match any open level {levels:?}")]
    InconsistentIndentation {
        /// Number of the offending line (starting with 1)
        line: usize,
        /// Indentation width of the offending line
        width: usize,
        /// Indentation widths open at that line
        levels: Vec<usize>,
    },
}

/// Rewrites indentation into explicit markers, one line at a time
#[derive(Debug, Default, Clone)]
pub struct IndentNormalizer {
    /// Stack of open indentation widths
    levels: Vec<usize>,
    /// Number of lines processed so far
    line: usize,
    /// Normalized lines
    output: Vec<String>,
}

impl IndentNormalizer {
    /// Create a new [IndentNormalizer].
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the indentation width of a line.
    fn width(line: &str) -> usize {
        if line.trim_start().starts_with(ANSWER_HEADER) {
            0
        } else {
            line.chars().take_while(|&c| c == ' ').count()
        }
    }

    fn emit(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }

    /// Process the next line of input.
    pub fn push_line(&mut self, line: &str) -> Result<(), NormalizationError> {
        self.line += 1;

        if line.trim().is_empty() {
            self.emit(line);
            return Ok(());
        }

        let width = Self::width(line);

        let Some(&current) = self.levels.last() else {
            self.levels.push(width);
            self.emit(line);
            return Ok(());
        };

        if width > current {
            log::trace!("line {}: indent to {} spaces", self.line, width);
            self.emit(INDENT_MARKER);
            self.levels.push(width);
        } else if width < current {
            if !self.levels.contains(&width) {
                return Err(NormalizationError::InconsistentIndentation {
                    line: self.line,
                    width,
                    levels: self.levels.clone(),
                });
            }

            while self.levels.last().is_some_and(|&level| level != width) {
                log::trace!("line {}: dedent from {:?}", self.line, self.levels.last());
                self.emit(DEDENT_MARKER);
                self.levels.pop();
            }
        }

        self.emit(line);
        Ok(())
    }

    /// Close all open levels and return the normalized text.
    pub fn finish(mut self) -> String {
        while self.levels.len() > 1 {
            self.emit(DEDENT_MARKER);
            self.levels.pop();
        }

        log::debug!("normalized {} lines", self.line);
        self.output.join("\n")
    }
}

/// Normalize the indentation of the given text.
pub fn normalize(text: &str) -> Result<String, NormalizationError> {
    let mut normalizer = IndentNormalizer::new();
    for line in text.lines() {
        normalizer.push_line(line)?;
    }

    Ok(normalizer.finish())
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use test_log::test;

    use super::{normalize, NormalizationError, DEDENT_MARKER, INDENT_MARKER};

    #[test]
    fn nested_blocks() {
        let input = "a :-\n    b :-\n        c.\n    d.\ne.";
        let expected = "a :-\n{{INDENT}}\n    b :-\n{{INDENT}}\n        c.\n{{DEDENT}}\n    d.\n{{DEDENT}}\ne.";

        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[test]
    fn answer_header_is_unindented() {
        let input = "QUERY:?- p.\n\n        ANSWER:\t1\t(in 0.1 ms)\nMODEL:";
        let expected = "QUERY:?- p.\n\n        ANSWER:\t1\t(in 0.1 ms)\nMODEL:";

        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[test]
    fn blank_lines_are_untracked() {
        let input = "a :-\n    b,\n\n    c.";
        let expected = "a :-\n{{INDENT}}\n    b,\n\n    c.\n{{DEDENT}}";

        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[test]
    fn end_of_input_closes_levels() {
        let normalized = normalize("a\n  b\n    c").unwrap();

        assert_eq!(normalized.matches(INDENT_MARKER).count(), 2);
        assert!(normalized.ends_with("c\n{{DEDENT}}\n{{DEDENT}}"));
    }

    #[test]
    fn unknown_level() {
        let result = normalize("a\n    b\n  c");

        assert_eq!(
            result,
            Err(NormalizationError::InconsistentIndentation {
                line: 3,
                width: 2,
                levels: vec![0, 4],
            })
        );
    }

    #[test]
    fn first_line_sets_base_level() {
        let input = "  a\n    b\n  c";
        let expected = "  a\n{{INDENT}}\n    b\n{{DEDENT}}\n  c";

        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize("").unwrap(), "");
    }

    #[quickcheck]
    fn markers_are_balanced(steps: Vec<bool>) -> bool {
        let mut depth = 0usize;
        let mut increases = 0usize;
        let mut lines = vec![String::from("root")];

        for (index, deeper) in steps.iter().enumerate() {
            if *deeper {
                depth += 1;
                increases += 1;
            } else {
                depth = depth.saturating_sub(1);
            }
            lines.push(format!("{}line{}", " ".repeat(4 * depth), index));
        }
        log::debug!("used lines: {:?}", lines);

        let Ok(normalized) = normalize(&lines.join("\n")) else {
            return false;
        };
        let content = normalized
            .lines()
            .filter(|line| *line != INDENT_MARKER && *line != DEDENT_MARKER)
            .collect::<Vec<_>>();

        normalized.matches(INDENT_MARKER).count() == increases
            && normalized.matches(DEDENT_MARKER).count() == increases
            && content == lines.iter().map(String::as_str).collect::<Vec<_>>()
    }
}
