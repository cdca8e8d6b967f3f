//! This module defines [Atom]
#![allow(missing_docs)]

use enum_assoc::Assoc;
use nom::{branch::alt, combinator::map, sequence::preceded};

use crate::parser::{
    ast::{spanned, token::Token, ResponseAST},
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// Marker that indicates whether an atom is classically negated
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn prefix(&self) -> &'static str)]
pub enum AtomKind {
    /// Atom without prefix
    #[assoc(prefix = "")]
    Plain,
    /// Atom prefixed with `-`
    #[assoc(prefix = "-")]
    Negated,
}

/// AST node representing an atom, the functor of a term or a constant
#[derive(Debug)]
pub struct Atom<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Whether the atom is negated
    kind: AtomKind,
    /// Name of the atom, without the negation prefix
    name: Token<'a>,
}

impl<'a> Atom<'a> {
    /// Return the name of the atom without the negation prefix.
    pub fn name(&self) -> &'a str {
        self.name.text()
    }

    /// Return whether the atom is negated.
    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    fn parse_negated(input: ParserInput<'a>) -> ParserResult<'a, (AtomKind, Token<'a>)> {
        context(
            ParserContext::NegatedAtom,
            map(
                preceded(Token::minus_immediate, Token::name_immediate),
                |name| (AtomKind::Negated, name),
            ),
        )(input)
    }

    fn parse_plain(input: ParserInput<'a>) -> ParserResult<'a, (AtomKind, Token<'a>)> {
        map(Token::name_immediate, |name| (AtomKind::Plain, name))(input)
    }
}

const CONTEXT: ParserContext = ParserContext::Atom;

impl<'a> ResponseAST<'a> for Atom<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        Vec::default()
    }

    fn span(&self) -> Span<'a> {
        self.span
    }

    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a,
    {
        spanned(CONTEXT, alt((Self::parse_negated, Self::parse_plain)))(input).map(
            |(rest, (span, (kind, name)))| (rest, Self { span, kind, name }),
        )
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

impl std::fmt::Display for Atom<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name())
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{
            atom::{Atom, AtomKind},
            ResponseAST,
        },
        context::ParserContext,
        error::deepest_errors,
        ParserInput,
    };

    #[test]
    fn parse_atom() {
        let test = vec![
            ("socrates", ("socrates", AtomKind::Plain)),
            ("-mortal", ("mortal", AtomKind::Negated)),
            ("  3rd_place", ("3rd_place", AtomKind::Plain)),
            ("rps'", ("rps'", AtomKind::Plain)),
        ];

        for (input, expected) in test {
            let parser_input = ParserInput::new(input);
            let result = all_consuming(Atom::parse)(parser_input);

            assert!(result.is_ok(), "{input}");
            let result = result.unwrap();
            assert_eq!(expected, (result.1.name(), result.1.kind()));
        }
    }

    #[test]
    fn reject_atom() {
        for input in ["Socrates", "- mortal", "_", "(a)"] {
            let result = all_consuming(Atom::parse)(ParserInput::new(input));
            assert!(result.is_err(), "{input}");
        }
    }

    #[test]
    fn negated_text() {
        let (_, atom) = Atom::parse(ParserInput::new("-mortal")).unwrap();
        assert_eq!(atom.to_string(), "-mortal");
        assert_eq!(atom.span().fragment(), "-mortal");
    }

    #[test]
    fn negated_atom_errors_name_the_rule() {
        let error = match Atom::parse(ParserInput::new("-Mortal")) {
            Err(nom::Err::Error(error)) => error,
            other => panic!("unexpected result: {other:?}"),
        };

        let (position, errors) = deepest_errors(&error);
        assert_eq!(position.column, 2);
        assert!(errors
            .iter()
            .all(|error| error.context.contains(&ParserContext::NegatedAtom)));
    }
}
