//! This module defines [Parser], which is responsible for parsing normalized solver output.

pub mod ast;
pub mod context;
pub mod error;
pub mod indent;
pub mod span;

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use ast::{response::Response, ResponseAST};
use error::{deepest_errors, GrammarError, ParserError, ParserErrorTree};
use nom::{
    character::complete::multispace0,
    combinator::all_consuming,
    sequence::terminated,
    IResult,
};

pub use span::ParserInput;

/// Output of a nom parser function
pub type ParserResult<'a, Output> = IResult<ParserInput<'a>, Output, ParserErrorTree<'a>>;

/// How much of the input the parser has to consume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// The whole input, apart from trailing whitespace, must form a response
    #[default]
    Strict,
    /// A prefix of the input forming a response is accepted
    Partial,
}

/// Parser for normalized s(CASP) output
#[derive(Debug)]
pub struct Parser<'a> {
    /// Reference to the text that is going to be parsed
    input: &'a str,
    /// Label of the input text, usually a path of the input file
    label: String,
    /// Whether trailing input is rejected
    mode: ParseMode,
}

/// Contains all errors that occurred during parsing
#[derive(Debug)]
pub struct ParserErrorReport<'a> {
    /// Reference to the text that was parsed
    input: &'a str,
    /// Label of the input text, usually a path of the input file
    label: String,
    /// List of [ParserError]s
    errors: Vec<ParserError>,
}

impl<'a> ParserErrorReport<'a> {
    /// Return the errors collected in this report.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Return the label of the parsed input.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Print the given reports.
    pub fn eprint<'s, ReportIterator>(
        &'s self,
        reports: ReportIterator,
    ) -> Result<(), std::io::Error>
    where
        ReportIterator: Iterator<Item = Report<'s, (String, Range<usize>)>>,
    {
        for report in reports {
            report.eprint((self.label.clone(), Source::from(self.input)))?;
        }

        Ok(())
    }

    /// Build a [Report] for each error.
    pub fn build_reports(&self) -> impl Iterator<Item = Report<'_, (String, Range<usize>)>> {
        self.errors
            .iter()
            .map(move |error| build_report(&self.label, error))
    }

    /// Detach the report from the parsed text.
    pub fn into_owned(self) -> GrammarError {
        GrammarError::new(self.label, self.input.to_owned(), self.errors)
    }
}

impl GrammarError {
    /// Print a report for each error to stderr.
    pub fn eprint(&self) -> Result<(), std::io::Error> {
        for error in self.errors() {
            build_report(self.label(), error)
                .eprint((self.label().to_owned(), Source::from(self.input())))?;
        }

        Ok(())
    }
}

/// Build a [Report] pointing at the position of the given error.
fn build_report<'s>(label: &str, error: &ParserError) -> Report<'s, (String, Range<usize>)> {
    let message = error.to_string();

    Report::build(ReportKind::Error, label.to_owned(), error.position.offset)
        .with_message(message.clone())
        .with_label(
            Label::new((label.to_owned(), error.position.range()))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
}

impl<'a> Parser<'a> {
    /// Initialize the parser.
    pub fn initialize(input: &'a str, label: String) -> Self {
        Self {
            input,
            label,
            mode: ParseMode::default(),
        }
    }

    /// Set the [ParseMode] of this parser.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse the input.
    pub fn parse(self) -> Result<Response<'a>, ParserErrorReport<'a>> {
        let parser_input = ParserInput::new(self.input);

        let result = match self.mode {
            ParseMode::Strict => {
                all_consuming(terminated(Response::parse, multispace0))(parser_input)
            }
            ParseMode::Partial => Response::parse(parser_input),
        };

        match result {
            Ok((rest, response)) => {
                let remaining = rest.fragment().trim_end().len();
                if remaining > 0 {
                    log::warn!(
                        "{}: {} characters after the response were not parsed",
                        self.label,
                        remaining
                    );
                }
                log::debug!(
                    "{}: parsed response with {} answers",
                    self.label,
                    response.answers().len()
                );

                Ok(response)
            }
            Err(nom::Err::Error(error)) | Err(nom::Err::Failure(error)) => {
                let (_, errors) = deepest_errors(&error);
                Err(self.report(errors))
            }
            Err(nom::Err::Incomplete(_)) => {
                let position = span::CharacterPosition {
                    offset: self.input.len(),
                    line: u32::try_from(self.input.lines().count()).unwrap_or(u32::MAX),
                    column: 1,
                };
                let error = ParserError {
                    position,
                    context: Vec::new(),
                    message: Some(String::from("unexpected end of input")),
                };

                Err(self.report(vec![error]))
            }
        }
    }

    fn report(self, errors: Vec<ParserError>) -> ParserErrorReport<'a> {
        ParserErrorReport {
            input: self.input,
            label: self.label,
            errors,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ParseMode, Parser};

    const RESPONSE: &str = "QUERY:?- mortal(socrates).\n\nANSWER:\t1\t(in 0.101 ms)\n\nMODEL:\n{ mortal(socrates),  human(socrates) }\n\nBINDINGS:\n";

    #[test]
    fn parse_strict() {
        let response = Parser::initialize(RESPONSE, String::from("test"))
            .parse()
            .unwrap();
        assert_eq!(response.answers().len(), 1);
    }

    #[test]
    fn strict_rejects_trailing_input() {
        let input = format!("{RESPONSE}garbage");
        let report = Parser::initialize(&input, String::from("test"))
            .parse()
            .unwrap_err();
        assert!(!report.errors().is_empty());
        assert_eq!(report.build_reports().count(), report.errors().len());
    }

    #[test]
    fn partial_accepts_prefix() {
        let input = format!("{RESPONSE}garbage");
        let response = Parser::initialize(&input, String::from("test"))
            .with_mode(ParseMode::Partial)
            .parse()
            .unwrap();
        assert_eq!(response.answers().len(), 1);
    }

    #[test]
    fn error_reports_position() {
        let report = Parser::initialize("QUERY:?- p(a)", String::from("test"))
            .parse()
            .unwrap_err();
        let error = &report.errors()[0];
        assert_eq!(error.position.line, 1);
        assert_eq!(error.expected(), ".");
    }
}
