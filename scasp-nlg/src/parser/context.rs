//! This module defines [ParserContext].
#![allow(missing_docs)]

use enum_assoc::Assoc;
use nom_supreme::context::ContextError;

use super::{ast::token::TokenKind, error::ParserErrorTree, ParserInput, ParserResult};

/// Context, in which a particular parse error occurred
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn name(&self) -> &'static str)]
pub enum ParserContext {
    /// Token
    #[assoc(name = _kind.name())]
    Token { kind: TokenKind },
    /// Atom
    #[assoc(name = "atom")]
    Atom,
    /// Classically negated atom
    #[assoc(name = "negated atom")]
    NegatedAtom,
    /// Named variable
    #[assoc(name = "named variable")]
    NamedVariable,
    /// Silent variable
    #[assoc(name = "silent variable")]
    SilentVariable,
    /// Constraint set attached to a variable
    #[assoc(name = "variable constraint")]
    VariableConstraint,
    /// Variable
    #[assoc(name = "variable")]
    Variable,
    /// Atom or variable
    #[assoc(name = "symbol")]
    Symbol,
    /// Argument of a term
    #[assoc(name = "argument")]
    Argument,
    /// Parenthesized argument list
    #[assoc(name = "argument list")]
    ArgumentList,
    /// Term
    #[assoc(name = "term")]
    Term,
    /// Term negated as failure
    #[assoc(name = "negation as failure")]
    NafTerm,
    /// Equality or disequality operator
    #[assoc(name = "constraint operator")]
    ConstraintOperator,
    /// Constraint
    #[assoc(name = "constraint")]
    Constraint,
    /// Statement
    #[assoc(name = "statement")]
    Statement,
    /// Query
    #[assoc(name = "query")]
    Query,
    /// Unity binding
    #[assoc(name = "unity")]
    Unity,
    /// Disunity binding
    #[assoc(name = "disunity")]
    Disunity,
    /// Binding
    #[assoc(name = "binding")]
    Binding,
    /// Bindings section of an answer
    #[assoc(name = "bindings")]
    BindingsSet,
    /// Indented list of reasons
    #[assoc(name = "list of reasons")]
    ListOfReasons,
    /// Conclusion with its reasons
    #[assoc(name = "conclusion")]
    Conclusion,
    /// Reason
    #[assoc(name = "reason")]
    Reason,
    /// Justification tree
    #[assoc(name = "justification tree")]
    Justification,
    /// Model
    #[assoc(name = "model")]
    Model,
    /// Runtime annotation of an answer
    #[assoc(name = "runtime")]
    Runtime,
    /// Answer
    #[assoc(name = "answer")]
    Answer,
    /// Response content
    #[assoc(name = "response content")]
    ResponseContent,
    /// Response
    #[assoc(name = "response")]
    Response,
}

impl ParserContext {
    /// Create a [ParserContext] from a [TokenKind].
    pub fn token(kind: TokenKind) -> Self {
        Self::Token { kind }
    }
}

/// Add context to an input parser.
pub(crate) fn context<'a, Output, NomParser>(
    context: ParserContext,
    mut f: NomParser,
) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, Output>
where
    NomParser: nom::Parser<ParserInput<'a>, Output, ParserErrorTree<'a>>,
{
    move |i| match f.parse(i) {
        Ok(o) => Ok(o),
        Err(nom::Err::Incomplete(i)) => Err(nom::Err::Incomplete(i)),
        Err(nom::Err::Error(e)) => {
            Err(nom::Err::Error(ParserErrorTree::add_context(i, context, e)))
        }
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(ParserErrorTree::add_context(
            i, context, e,
        ))),
    }
}
