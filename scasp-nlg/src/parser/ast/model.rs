//! This module defines [Model]
#![allow(missing_docs)]

use nom::{
    multi::separated_list0,
    sequence::{delimited, preceded},
};

use crate::parser::{
    ast::{spanned, statement::Statement, token::Token, ResponseAST},
    context::ParserContext,
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing the `MODEL:` section of an answer,
/// i.e. the statements that hold in this answer set
#[derive(Debug)]
pub struct Model<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Statements of the model in the order they were printed
    statements: Vec<Statement<'a>>,
}

impl<'a> Model<'a> {
    /// Return an iterator over the statements of the model.
    pub fn statements(&self) -> impl Iterator<Item = &Statement<'a>> {
        self.statements.iter()
    }

    /// Return the number of statements in the model.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Return whether the model is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

const CONTEXT: ParserContext = ParserContext::Model;

impl<'a> ResponseAST<'a> for Model<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        for statement in &self.statements {
            result.push(statement);
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
                Token::model_header,
                delimited(
                    Token::open_brace,
                    separated_list0(Token::comma, Statement::parse),
                    Token::closed_brace,
                ),
            ),
        )(input)
        .map(|(rest, (span, statements))| (rest, Self { span, statements }))
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{model::Model, ResponseAST},
        ParserInput,
    };

    #[test]
    fn parse_model() {
        let test = vec![
            ("MODEL:\n{ mortal(socrates),  human(socrates) }", 2),
            ("MODEL: {}", 0),
            ("MODEL:\n{ p(X | {X \\= a}), not q(a), -r }", 3),
        ];

        for (input, expected) in test {
            let result = all_consuming(Model::parse)(ParserInput::new(input));

            assert!(result.is_ok(), "{input}");
            assert_eq!(result.unwrap().1.len(), expected);
        }
    }

    #[test]
    fn reject_model() {
        for input in ["MODEL: { p, }", "MODEL: p", "{ p }"] {
            let result = all_consuming(Model::parse)(ParserInput::new(input));
            assert!(result.is_err(), "{input}");
        }
    }
}
