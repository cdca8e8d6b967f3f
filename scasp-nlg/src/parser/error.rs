//! This module defines the error type that is returned when the parser is unsuccessful.

use nom::error::ErrorKind;
use nom_supreme::error::{BaseErrorKind, GenericErrorTree, StackContext};
use thiserror::Error;

use super::{context::ParserContext, span::CharacterPosition, ParserInput};

/// Error tree used by nom parser
pub type ParserErrorTree<'a> = GenericErrorTree<
    ParserInput<'a>,
    &'static str,
    ParserContext,
    Box<dyn std::error::Error + Send + Sync + 'static>,
>;

/// Raised when both branches of an exclusive alternative match the same text
#[derive(Error, Debug, Clone, Copy)]
#[error("ambiguous input: more than one alternative of `{rule}` matches")]
pub struct AmbiguityError {
    /// Name of the rule whose alternatives overlap
    pub rule: &'static str,
}

/// Error while parsing solver output
#[derive(Debug, Clone)]
pub struct ParserError {
    /// Position where the error occurred
    pub position: CharacterPosition,
    /// Parsing stack, innermost rule first
    pub context: Vec<ParserContext>,
    /// Message of an error raised outside of the grammar rules
    pub message: Option<String>,
}

impl ParserError {
    /// Name of the innermost rule that failed,
    /// or "input" if the failure happened outside of any rule.
    pub fn expected(&self) -> &'static str {
        self.context.first().map_or("input", ParserContext::name)
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} at {}", message, self.position),
            None => write!(f, "expected `{}` at {}", self.expected(), self.position),
        }
    }
}

fn context_names(contexts: &[(ParserInput<'_>, StackContext<ParserContext>)]) -> Vec<ParserContext> {
    contexts
        .iter()
        .filter_map(|(_, context)| match context {
            StackContext::Kind(_) => None,
            StackContext::Context(context) => Some(*context),
        })
        .collect()
}

/// Collect the errors that occurred furthest into the input.
pub(crate) fn deepest_errors(error: &ParserErrorTree<'_>) -> (CharacterPosition, Vec<ParserError>) {
    match error {
        ParserErrorTree::Base { location, kind } => {
            let position = CharacterPosition::of(location);
            let message = match kind {
                BaseErrorKind::External(error) => Some(error.to_string()),
                BaseErrorKind::Kind(ErrorKind::Eof) => Some(String::from("unexpected input")),
                _ => None,
            };

            (
                position,
                vec![ParserError {
                    position,
                    context: Vec::new(),
                    message,
                }],
            )
        }
        ParserErrorTree::Stack { base, contexts } => {
            let (position, mut errors) = deepest_errors(base);
            let contexts = context_names(contexts);
            for error in &mut errors {
                error.context.extend(contexts.iter().copied());
            }

            (position, errors)
        }
        ParserErrorTree::Alt(alternatives) => {
            let mut deepest_position = CharacterPosition::default();
            let mut result = Vec::new();

            for alternative in alternatives {
                let (position, mut errors) = deepest_errors(alternative);
                if position > deepest_position || result.is_empty() {
                    deepest_position = position;
                    result.clear();
                    result.append(&mut errors);
                } else if position == deepest_position {
                    result.append(&mut errors);
                }
            }

            (deepest_position, result)
        }
    }
}

/// Owned form of a failed parse, detached from the parsed text
#[derive(Error, Debug, Clone)]
#[error("failed to parse `{label}`: {}", first_error(.errors))]
pub struct GrammarError {
    /// Label of the input text, usually a path of the input file
    label: String,
    /// Normalized text that was parsed
    input: String,
    /// Errors at the furthest position the parser reached
    errors: Vec<ParserError>,
}

fn first_error(errors: &[ParserError]) -> String {
    errors
        .first()
        .map_or_else(|| String::from("unknown error"), ToString::to_string)
}

impl GrammarError {
    pub(crate) fn new(label: String, input: String, errors: Vec<ParserError>) -> Self {
        Self {
            label,
            input,
            errors,
        }
    }

    /// Label of the input text
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Normalized text that was parsed
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Errors at the furthest position the parser reached
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }
}
