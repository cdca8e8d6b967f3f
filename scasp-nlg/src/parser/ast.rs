//! This module defines the abstract syntax tree representation of s(CASP) solver output.

pub mod answer;
pub mod atom;
pub mod binding;
pub mod constraint;
pub mod justification;
pub mod model;
pub mod query;
pub mod response;
pub mod statement;
pub mod symbol;
pub mod term;
pub mod token;
pub mod variable;

use std::fmt::Debug;

use ascii_tree::{write_tree, Tree};
use colored::Colorize;
use nom::{
    character::complete::multispace0, combinator::consumed, error::ParseError,
    sequence::preceded,
};
use nom_supreme::error::BaseErrorKind;

use super::{
    context::{context, ParserContext},
    error::{AmbiguityError, ParserErrorTree},
    span::Span,
    ParserInput, ParserResult,
};

/// Trait implemented by nodes in the abstract syntax tree
pub trait ResponseAST<'a>: Debug + Sync {
    /// Return all children of this node.
    fn children(&self) -> Vec<&dyn ResponseAST<'a>>;

    /// Return the region of text this node originates from.
    fn span(&self) -> Span<'a>;

    /// Parse the given input into this type of node
    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a;

    /// Return [ParserContext] indicating the type of node.
    fn context(&self) -> ParserContext;
}

/// Skip leading whitespace, then run `parser` under the given context,
/// also returning the [Span] of the text it consumed.
pub(crate) fn spanned<'a, Output, NomParser>(
    rule: ParserContext,
    parser: NomParser,
) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, (Span<'a>, Output)>
where
    NomParser: nom::Parser<ParserInput<'a>, Output, ParserErrorTree<'a>>,
{
    let mut inner = preceded(multispace0, context(rule, consumed(parser)));

    move |input| {
        inner(input).map(|(rest, (consumed, output))| (rest, (Span::from(consumed), output)))
    }
}

/// Wrap an error raised outside of the grammar rules.
pub(crate) fn external_error<'a, Error>(location: ParserInput<'a>, error: Error) -> ParserErrorTree<'a>
where
    Error: std::error::Error + Send + Sync + 'static,
{
    ParserErrorTree::Base {
        location,
        kind: BaseErrorKind::External(Box::new(error)),
    }
}

/// Exclusive alternative of two parsers.
///
/// Both parsers are run on the same input.
/// If only one of them succeeds, its result is returned.
/// If both succeed, the one that consumed more input wins;
/// if they consumed the same amount, the input is ambiguous
/// and parsing fails without backtracking.
pub(crate) fn exclusive<'a, Output, Left, Right>(
    rule: ParserContext,
    mut left: Left,
    mut right: Right,
) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, Output>
where
    Left: nom::Parser<ParserInput<'a>, Output, ParserErrorTree<'a>>,
    Right: nom::Parser<ParserInput<'a>, Output, ParserErrorTree<'a>>,
{
    move |input: ParserInput<'a>| match (left.parse(input), right.parse(input)) {
        (Ok(left), Ok(right)) => {
            let left_end = left.0.location_offset();
            let right_end = right.0.location_offset();

            if left_end > right_end {
                Ok(left)
            } else if right_end > left_end {
                Ok(right)
            } else {
                log::trace!(
                    "both alternatives of {} match {:?}",
                    rule.name(),
                    &input.fragment()[..left_end - input.location_offset()]
                );

                Err(nom::Err::Failure(external_error(
                    input,
                    AmbiguityError { rule: rule.name() },
                )))
            }
        }
        (Ok(result), Err(nom::Err::Error(_))) | (Err(nom::Err::Error(_)), Ok(result)) => {
            Ok(result)
        }
        (Err(nom::Err::Error(left)), Err(nom::Err::Error(right))) => {
            Err(nom::Err::Error(left.or(right)))
        }
        (Err(error), _) | (_, Err(error)) => Err(error),
    }
}

/// Render the tree below the given node.
pub fn ast_to_ascii_tree<'a>(node: &'a dyn ResponseAST<'a>) -> Tree {
    let children = node.children();
    let nested = children
        .iter()
        .map(|child| ast_to_ascii_tree(*child))
        .collect::<Vec<_>>();

    let span = node.span();
    let fragment = span.fragment();
    let text = if fragment.chars().count() > 60 {
        format!("{:?}[…]", fragment.chars().take(60).collect::<String>())
    } else {
        format!("{:?}", fragment)
    };

    Tree::Node(
        format!(
            "{} @{}:{} {}",
            node.context().name(),
            span.location_line().to_string().blue(),
            span.get_utf8_column(),
            if children.is_empty() {
                text.bright_red()
            } else {
                text.bright_green()
            }
        ),
        nested,
    )
}

/// Render the tree below the given node as text.
pub fn ast_to_ascii_tree_string<'a>(node: &'a dyn ResponseAST<'a>) -> Option<String> {
    let mut result = String::new();
    write_tree(&mut result, &ast_to_ascii_tree(node)).ok()?;
    Some(result)
}

#[cfg(test)]
mod test {
    use nom::{bytes::complete::tag, combinator::recognize, sequence::pair};

    use crate::parser::{
        ast::{ast_to_ascii_tree_string, exclusive, query::Query, ResponseAST},
        context::ParserContext,
        error::{deepest_errors, ParserErrorTree},
        ParserInput, ParserResult,
    };

    fn short(input: ParserInput<'_>) -> ParserResult<'_, ParserInput<'_>> {
        tag("ab")(input)
    }

    fn long(input: ParserInput<'_>) -> ParserResult<'_, ParserInput<'_>> {
        recognize(pair(tag("ab"), tag("c")))(input)
    }

    fn other(input: ParserInput<'_>) -> ParserResult<'_, ParserInput<'_>> {
        tag("a")(input)
    }

    #[test]
    fn exclusive_prefers_longer_match() {
        let (rest, result) =
            exclusive(ParserContext::Reason, short, long)(ParserInput::new("abcd")).unwrap();
        assert_eq!(*result.fragment(), "abc");
        assert_eq!(*rest.fragment(), "d");

        let (_, result) =
            exclusive(ParserContext::Reason, long, short)(ParserInput::new("abd")).unwrap();
        assert_eq!(*result.fragment(), "ab");
    }

    #[test]
    fn exclusive_rejects_ambiguity() {
        let result = exclusive(ParserContext::Symbol, short, short)(ParserInput::new("ab"));

        match result {
            Err(nom::Err::Failure(error)) => {
                let error: ParserErrorTree = error;
                let (_, errors) = deepest_errors(&error);
                let message = errors[0].message.clone().unwrap();
                assert!(message.contains("symbol"), "{message}");
            }
            _ => panic!("expected an ambiguity failure"),
        }
    }

    #[test]
    fn exclusive_fails_recoverably() {
        let result = exclusive(ParserContext::Symbol, long, other)(ParserInput::new("xyz"));
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn print_tree() {
        colored::control::set_override(false);

        let (_, query) = Query::parse(ParserInput::new("?- p(a), q.")).unwrap();
        let tree = ast_to_ascii_tree_string(&query).unwrap();

        assert!(tree.contains("query @1:1"), "{tree}");
        assert!(tree.contains("\"p(a)\""), "{tree}");
        assert!(tree.contains("statement @1:10"), "{tree}");
    }
}
