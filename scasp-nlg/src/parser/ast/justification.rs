//! This module defines the nodes of a justification tree:
//! [Justification], [ListOfReasons], [Reason] and [Conclusion].
#![allow(missing_docs)]

use nom::{
    combinator::{map, opt},
    multi::many1,
    sequence::{preceded, terminated, tuple},
};

use crate::parser::{
    ast::{exclusive, spanned, statement::Statement, token::Token, ResponseAST},
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing a statement together with the reasons it holds,
/// e.g. `wins(a,rps) :- {{INDENT}} ... {{DEDENT}}`
#[derive(Debug)]
pub struct Conclusion<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Statement that is concluded
    conclusion: Statement<'a>,
    /// Reasons supporting the conclusion
    reasons: ListOfReasons<'a>,
}

impl<'a> Conclusion<'a> {
    /// Return the concluded statement.
    pub fn conclusion(&self) -> &Statement<'a> {
        &self.conclusion
    }

    /// Return the reasons supporting the conclusion.
    pub fn reasons(&self) -> &ListOfReasons<'a> {
        &self.reasons
    }
}

impl<'a> ResponseAST<'a> for Conclusion<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.conclusion);
        result.push(&self.reasons);

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
            ParserContext::Conclusion,
            tuple((
                Statement::parse,
                Token::implication,
                Token::indent,
                ListOfReasons::parse,
                Token::dedent,
            )),
        )(input)
        .map(|(rest, (span, (conclusion, _, _, reasons, _)))| {
            (
                rest,
                Self {
                    span,
                    conclusion,
                    reasons,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        ParserContext::Conclusion
    }
}

/// AST node representing one node of a justification tree
#[derive(Debug)]
pub enum Reason<'a> {
    /// Statement derived from further reasons
    Conclusion(Conclusion<'a>),
    /// Statement without further justification
    Term(Statement<'a>),
}

impl<'a> Reason<'a> {
    /// Return the statement this reason establishes.
    pub fn statement(&self) -> &Statement<'a> {
        match self {
            Reason::Conclusion(conclusion) => conclusion.conclusion(),
            Reason::Term(statement) => statement,
        }
    }

    /// Return the reasons below this one, if any.
    pub fn reasons(&self) -> Option<&ListOfReasons<'a>> {
        match self {
            Reason::Conclusion(conclusion) => Some(conclusion.reasons()),
            Reason::Term(_) => None,
        }
    }

    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Reason::Conclusion(conclusion) => conclusion,
            Reason::Term(statement) => statement,
        }
    }
}

impl<'a> ResponseAST<'a> for Reason<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        vec![self.ast_node()]
    }

    fn span(&self) -> Span<'a> {
        self.ast_node().span()
    }

    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a,
    {
        context(
            ParserContext::Reason,
            exclusive(
                ParserContext::Reason,
                map(Conclusion::parse, Reason::Conclusion),
                map(Statement::parse, Reason::Term),
            ),
        )(input)
    }

    fn context(&self) -> ParserContext {
        ParserContext::Reason
    }
}

/// AST node representing a sequence of reasons on the same indentation level
#[derive(Debug)]
pub struct ListOfReasons<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Reasons in the order they were printed
    reasons: Vec<Reason<'a>>,
}

impl<'a> ListOfReasons<'a> {
    /// Return an iterator over the reasons.
    pub fn reasons(&self) -> impl Iterator<Item = &Reason<'a>> {
        self.reasons.iter()
    }

    /// Return the number of reasons.
    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// Return whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Return the greatest nesting depth of the justification below this list.
    pub fn depth(&self) -> usize {
        1 + self
            .reasons
            .iter()
            .filter_map(Reason::reasons)
            .map(ListOfReasons::depth)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> ResponseAST<'a> for ListOfReasons<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        for reason in &self.reasons {
            result.push(reason);
        }

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
            ParserContext::ListOfReasons,
            terminated(
                many1(terminated(Reason::parse, opt(Token::comma))),
                opt(Token::dot),
            ),
        )(input)
        .map(|(rest, (span, reasons))| (rest, Self { span, reasons }))
    }

    fn context(&self) -> ParserContext {
        ParserContext::ListOfReasons
    }
}

/// AST node representing the `JUSTIFICATION_TREE:` section of an answer
#[derive(Debug)]
pub struct Justification<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Top-level reasons of the tree
    reasons: ListOfReasons<'a>,
}

impl<'a> Justification<'a> {
    /// Return the top-level reasons of the tree.
    pub fn reasons(&self) -> &ListOfReasons<'a> {
        &self.reasons
    }
}

const CONTEXT: ParserContext = ParserContext::Justification;

impl<'a> ResponseAST<'a> for Justification<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.reasons);

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
            preceded(Token::justification_header, ListOfReasons::parse),
        )(input)
        .map(|(rest, (span, reasons))| (rest, Self { span, reasons }))
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}
