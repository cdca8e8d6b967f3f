//! This module defines [Query]
#![allow(missing_docs)]

use nom::{multi::separated_list1, sequence::delimited};

use crate::parser::{
    ast::{spanned, statement::Statement, token::Token, ResponseAST},
    context::ParserContext,
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing the query the solver answered, e.g. `?- wins(A, rps).`
#[derive(Debug)]
pub struct Query<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Conjunction of statements that was queried
    statements: Vec<Statement<'a>>,
}

impl<'a> Query<'a> {
    /// Return an iterator over the statements of this query.
    pub fn statements(&self) -> impl Iterator<Item = &Statement<'a>> {
        self.statements.iter()
    }
}

const CONTEXT: ParserContext = ParserContext::Query;

impl<'a> ResponseAST<'a> for Query<'a> {
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
            delimited(
                Token::query_prompt,
                separated_list1(Token::comma, Statement::parse),
                Token::dot,
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
        ast::{query::Query, ResponseAST},
        ParserInput,
    };

    #[test]
    fn parse_query() {
        let test = vec![
            ("?- mortal(socrates).", 1),
            ("?-wins(A, rps), not loses(A).", 2),
            ("?- X = a, p(X) .", 2),
        ];

        for (input, expected) in test {
            let result = all_consuming(Query::parse)(ParserInput::new(input));

            assert!(result.is_ok(), "{input}");
            assert_eq!(result.unwrap().1.statements().count(), expected);
        }
    }

    #[test]
    fn reject_query() {
        for input in ["mortal(socrates).", "?- mortal(socrates)", "?- ."] {
            let result = all_consuming(Query::parse)(ParserInput::new(input));
            assert!(result.is_err(), "{input}");
        }
    }
}
