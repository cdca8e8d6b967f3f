//! This module defines [Binding] and [BindingsSet]
#![allow(missing_docs)]

use nom::{
    branch::alt,
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{preceded, separated_pair},
};

use crate::parser::{
    ast::{spanned, symbol::Symbol, token::Token, variable::Variable, ResponseAST},
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node stating that a variable is bound to a value, e.g. `Game = testgame`
#[derive(Debug)]
pub struct Unity<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Bound variable
    variable: Variable<'a>,
    /// Value of the variable
    value: Symbol<'a>,
}

impl<'a> Unity<'a> {
    /// Return the bound variable.
    pub fn variable(&self) -> &Variable<'a> {
        &self.variable
    }

    /// Return the value of the variable.
    pub fn value(&self) -> &Symbol<'a> {
        &self.value
    }
}

impl<'a> ResponseAST<'a> for Unity<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.variable);
        result.push(&self.value);

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
            ParserContext::Unity,
            separated_pair(Variable::parse, Token::equal, Symbol::parse),
        )(input)
        .map(|(rest, (span, (variable, value)))| {
            (
                rest,
                Self {
                    span,
                    variable,
                    value,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        ParserContext::Unity
    }
}

impl std::fmt::Display for Unity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.variable, self.value)
    }
}

/// AST node stating that a variable differs from a value, e.g. `P \= 1`
#[derive(Debug)]
pub struct Disunity<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Constrained variable
    variable: Variable<'a>,
    /// Value the variable differs from
    value: Symbol<'a>,
}

impl<'a> Disunity<'a> {
    /// Return the constrained variable.
    pub fn variable(&self) -> &Variable<'a> {
        &self.variable
    }

    /// Return the value the variable differs from.
    pub fn value(&self) -> &Symbol<'a> {
        &self.value
    }
}

impl<'a> ResponseAST<'a> for Disunity<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.variable);
        result.push(&self.value);

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
            ParserContext::Disunity,
            separated_pair(Variable::parse, Token::unequal, Symbol::parse),
        )(input)
        .map(|(rest, (span, (variable, value)))| {
            (
                rest,
                Self {
                    span,
                    variable,
                    value,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        ParserContext::Disunity
    }
}

impl std::fmt::Display for Disunity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \\= {}", self.variable, self.value)
    }
}

/// AST node representing a single binding reported by the solver
#[derive(Debug)]
pub enum Binding<'a> {
    /// Variable bound to a value
    Unity(Unity<'a>),
    /// Variable differing from a value
    Disunity(Disunity<'a>),
}

impl<'a> Binding<'a> {
    /// Return the variable this binding is about.
    pub fn variable(&self) -> &Variable<'a> {
        match self {
            Binding::Unity(unity) => unity.variable(),
            Binding::Disunity(disunity) => disunity.variable(),
        }
    }

    /// Return the value on the right-hand side of this binding.
    pub fn value(&self) -> &Symbol<'a> {
        match self {
            Binding::Unity(unity) => unity.value(),
            Binding::Disunity(disunity) => disunity.value(),
        }
    }

    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Binding::Unity(unity) => unity,
            Binding::Disunity(disunity) => disunity,
        }
    }
}

impl<'a> ResponseAST<'a> for Binding<'a> {
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
            ParserContext::Binding,
            alt((
                map(Unity::parse, Binding::Unity),
                map(Disunity::parse, Binding::Disunity),
            )),
        )(input)
    }

    fn context(&self) -> ParserContext {
        ParserContext::Binding
    }
}

impl std::fmt::Display for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Unity(unity) => write!(f, "{unity}"),
            Binding::Disunity(disunity) => write!(f, "{disunity}"),
        }
    }
}

/// AST node representing the `BINDINGS:` section of an answer
#[derive(Debug)]
pub struct BindingsSet<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Bindings in the order they were reported
    bindings: Vec<Binding<'a>>,
}

impl<'a> BindingsSet<'a> {
    /// Return an iterator over the bindings.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding<'a>> {
        self.bindings.iter()
    }

    /// Return the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Return whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

const CONTEXT: ParserContext = ParserContext::BindingsSet;

impl<'a> ResponseAST<'a> for BindingsSet<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        for binding in &self.bindings {
            result.push(binding);
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
            preceded(
                Token::bindings_header,
                many0(separated_list1(Token::comma, Binding::parse)),
            ),
        )(input)
        .map(|(rest, (span, lines))| {
            (
                rest,
                Self {
                    span,
                    bindings: lines.into_iter().flatten().collect(),
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}
