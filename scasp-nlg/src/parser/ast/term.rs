//! This module defines [Term] and [Argument]
#![allow(missing_docs)]

use nom::{
    combinator::{map, opt},
    multi::separated_list1,
    sequence::{delimited, pair},
};

use crate::parser::{
    ast::{
        atom::Atom, exclusive, spanned, statement::Statement, token::Token, variable::Variable,
        ResponseAST,
    },
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing an argument of a [Term]
#[derive(Debug)]
pub enum Argument<'a> {
    /// Nested statement, usually a term
    Statement(Box<Statement<'a>>),
    /// Variable
    Variable(Variable<'a>),
}

impl<'a> Argument<'a> {
    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Argument::Statement(statement) => &**statement,
            Argument::Variable(variable) => variable,
        }
    }
}

impl<'a> ResponseAST<'a> for Argument<'a> {
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
            ParserContext::Argument,
            exclusive(
                ParserContext::Argument,
                map(Statement::parse, |statement| {
                    Argument::Statement(Box::new(statement))
                }),
                map(Variable::parse, Argument::Variable),
            ),
        )(input)
    }

    fn context(&self) -> ParserContext {
        ParserContext::Argument
    }
}

impl std::fmt::Display for Argument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Statement(statement) => write!(f, "{statement}"),
            Argument::Variable(variable) => write!(f, "{variable}"),
        }
    }
}

/// AST node representing a term, i.e. a functor with an optional list of arguments
#[derive(Debug)]
pub struct Term<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Functor of the term
    functor: Atom<'a>,
    /// Arguments of the term, empty if the term has no argument list
    arguments: Vec<Argument<'a>>,
}

impl<'a> Term<'a> {
    /// Return the functor of this term.
    pub fn functor(&self) -> &Atom<'a> {
        &self.functor
    }

    /// Return an iterator over the arguments of this term.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument<'a>> {
        self.arguments.iter()
    }

    /// Return the number of arguments of this term.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    fn parse_argument_list(input: ParserInput<'a>) -> ParserResult<'a, Vec<Argument<'a>>> {
        context(
            ParserContext::ArgumentList,
            delimited(
                Token::open_parenthesis,
                separated_list1(Token::comma, Argument::parse),
                Token::closed_parenthesis,
            ),
        )(input)
    }
}

const CONTEXT: ParserContext = ParserContext::Term;

impl<'a> ResponseAST<'a> for Term<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.functor);
        for argument in &self.arguments {
            result.push(argument);
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
            CONTEXT,
            pair(Atom::parse, opt(Self::parse_argument_list)),
        )(input)
        .map(|(rest, (span, (functor, arguments)))| {
            (
                rest,
                Self {
                    span,
                    functor,
                    arguments: arguments.unwrap_or_default(),
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

impl std::fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.functor)?;

        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (index, argument) in self.arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(")")?;
        }

        Ok(())
    }
}
