//! This module defines [Variable]
#![allow(missing_docs)]

use nom::{
    branch::alt,
    character::complete::satisfy,
    combinator::{map, not, opt},
    multi::separated_list1,
    sequence::{delimited, pair, terminated},
};

use crate::parser::{
    ast::{
        binding::Disunity,
        spanned,
        token::{is_identifier_char, Token},
        ResponseAST,
    },
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing the set of values a variable is constrained to differ from,
/// e.g. `| {X \= rock, X \= paper}`
#[derive(Debug)]
pub struct VariableConstraint<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Values excluded for the variable
    disunities: Vec<Disunity<'a>>,
}

impl<'a> VariableConstraint<'a> {
    /// Return an iterator over the disunities of this constraint.
    pub fn disunities(&self) -> impl Iterator<Item = &Disunity<'a>> {
        self.disunities.iter()
    }
}

impl<'a> ResponseAST<'a> for VariableConstraint<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        for disunity in &self.disunities {
            result.push(disunity);
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
            ParserContext::VariableConstraint,
            delimited(
                pair(Token::bar, Token::open_brace),
                separated_list1(Token::comma, Disunity::parse),
                Token::closed_brace,
            ),
        )(input)
        .map(|(rest, (span, disunities))| (rest, Self { span, disunities }))
    }

    fn context(&self) -> ParserContext {
        ParserContext::VariableConstraint
    }
}

impl std::fmt::Display for VariableConstraint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("| {")?;
        for (index, disunity) in self.disunities.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{disunity}")?;
        }
        f.write_str("}")
    }
}

/// AST node representing a variable with a name
#[derive(Debug)]
pub struct NamedVariable<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Name of the variable
    name: Token<'a>,
    /// Values this variable must differ from
    constraint: Option<VariableConstraint<'a>>,
}

impl<'a> NamedVariable<'a> {
    /// Return the name of the variable.
    pub fn name(&self) -> &'a str {
        self.name.text()
    }

    /// Return the constraint attached to this variable, if any.
    pub fn constraint(&self) -> Option<&VariableConstraint<'a>> {
        self.constraint.as_ref()
    }
}

impl<'a> ResponseAST<'a> for NamedVariable<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        if let Some(constraint) = &self.constraint {
            result.push(constraint);
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
            ParserContext::NamedVariable,
            pair(Token::variable_name, opt(VariableConstraint::parse)),
        )(input)
        .map(|(rest, (span, (name, constraint)))| {
            (
                rest,
                Self {
                    span,
                    name,
                    constraint,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        ParserContext::NamedVariable
    }
}

/// AST node representing the anonymous variable `_`
#[derive(Debug)]
pub struct SilentVariable<'a> {
    /// [Span] associated with this node
    span: Span<'a>,
}

impl<'a> ResponseAST<'a> for SilentVariable<'a> {
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
        spanned(
            ParserContext::SilentVariable,
            terminated(Token::underscore, not(satisfy(is_identifier_char))),
        )(input)
        .map(|(rest, (span, _))| (rest, Self { span }))
    }

    fn context(&self) -> ParserContext {
        ParserContext::SilentVariable
    }
}

/// AST node representing a variable
#[derive(Debug)]
pub enum Variable<'a> {
    /// Variable with a name
    Named(NamedVariable<'a>),
    /// Anonymous variable
    Silent(SilentVariable<'a>),
}

impl<'a> Variable<'a> {
    /// Return the name of the variable, or `None` for the anonymous variable.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Variable::Named(variable) => Some(variable.name()),
            Variable::Silent(_) => None,
        }
    }

    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Variable::Named(variable) => variable,
            Variable::Silent(variable) => variable,
        }
    }
}

impl<'a> ResponseAST<'a> for Variable<'a> {
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
            ParserContext::Variable,
            alt((
                map(NamedVariable::parse, Variable::Named),
                map(SilentVariable::parse, Variable::Silent),
            )),
        )(input)
    }

    fn context(&self) -> ParserContext {
        ParserContext::Variable
    }
}

impl std::fmt::Display for Variable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Named(variable) => match variable.constraint() {
                Some(constraint) => write!(f, "{} {}", variable.name(), constraint),
                None => f.write_str(variable.name()),
            },
            Variable::Silent(_) => f.write_str("_"),
        }
    }
}
