//! This module defines [Constraint]
#![allow(missing_docs)]

use enum_assoc::Assoc;
use nom::{branch::alt, combinator::value, sequence::tuple};

use crate::parser::{
    ast::{
        spanned,
        symbol::Symbol,
        token::Token,
        ResponseAST,
    },
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// Relation stated by a [Constraint]
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn symbol(&self) -> &'static str)]
pub enum ConstraintOperator {
    /// Both sides are equal
    #[assoc(symbol = "=")]
    Equality,
    /// Both sides differ
    #[assoc(symbol = "\\=")]
    Disequality,
}

impl ConstraintOperator {
    fn parse(input: ParserInput<'_>) -> ParserResult<'_, Self> {
        context(
            ParserContext::ConstraintOperator,
            alt((
                value(Self::Disequality, Token::unequal),
                value(Self::Equality, Token::equal),
            )),
        )(input)
    }
}

/// AST node representing a comparison between two symbols, e.g. `X \= rock`
#[derive(Debug)]
pub struct Constraint<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Left-hand side
    left: Symbol<'a>,
    /// Relation between both sides
    operator: ConstraintOperator,
    /// Right-hand side
    right: Symbol<'a>,
}

impl<'a> Constraint<'a> {
    /// Return the left-hand side of the constraint.
    pub fn left(&self) -> &Symbol<'a> {
        &self.left
    }

    /// Return the operator of the constraint.
    pub fn operator(&self) -> ConstraintOperator {
        self.operator
    }

    /// Return the right-hand side of the constraint.
    pub fn right(&self) -> &Symbol<'a> {
        &self.right
    }
}

const CONTEXT: ParserContext = ParserContext::Constraint;

impl<'a> ResponseAST<'a> for Constraint<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.left);
        result.push(&self.right);

        result
    }

    fn span(&self) -> Span<'a> {
        self.span
    }

    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a,
    {
        spanned(
            CONTEXT,
            tuple((Symbol::parse, ConstraintOperator::parse, Symbol::parse)),
        )(input)
        .map(|(rest, (span, (left, operator, right)))| {
            (
                rest,
                Self {
                    span,
                    left,
                    operator,
                    right,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

impl std::fmt::Display for Constraint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}
