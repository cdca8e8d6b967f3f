//! This module defines [Response], the root node of the abstract syntax tree.
#![allow(missing_docs)]

use nom::{
    branch::alt,
    combinator::map,
    multi::many0,
    sequence::{pair, preceded},
};

use crate::parser::{
    ast::{answer::Answer, query::Query, spanned, token::Token, ResponseAST},
    context::ParserContext,
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing what the solver reported after the query
#[derive(Debug)]
pub enum ResponseContent<'a> {
    /// The query has no answer
    NoModels {
        /// [Span] associated with this node
        span: Span<'a>,
    },
    /// Answers found by the solver
    Answers {
        /// [Span] associated with this node
        span: Span<'a>,
        /// Answers in the order they were found
        answers: Vec<Answer<'a>>,
    },
}

impl<'a> ResponseContent<'a> {
    /// Return the answers, which is empty if there are no models.
    pub fn answers(&self) -> &[Answer<'a>] {
        match self {
            ResponseContent::NoModels { .. } => &[],
            ResponseContent::Answers { answers, .. } => answers,
        }
    }
}

impl<'a> ResponseAST<'a> for ResponseContent<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        for answer in self.answers() {
            result.push(answer);
        }

        result
    }

    fn span(&self) -> Span<'a> {
        match self {
            ResponseContent::NoModels { span } | ResponseContent::Answers { span, .. } => *span,
        }
    }

    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a,
    {
        spanned(
            ParserContext::ResponseContent,
            alt((
                map(Token::no_models, |_| None),
                map(many0(Answer::parse), Some),
            )),
        )(input)
        .map(|(rest, (span, answers))| {
            let content = match answers {
                Some(answers) => ResponseContent::Answers { span, answers },
                None => ResponseContent::NoModels { span },
            };

            (rest, content)
        })
    }

    fn context(&self) -> ParserContext {
        ParserContext::ResponseContent
    }
}

/// AST node representing the complete output of the solver for one query
#[derive(Debug)]
pub struct Response<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Query that was answered
    query: Query<'a>,
    /// What the solver found
    content: ResponseContent<'a>,
}

impl<'a> Response<'a> {
    /// Return the query of this response.
    pub fn query(&self) -> &Query<'a> {
        &self.query
    }

    /// Return the content of this response.
    pub fn content(&self) -> &ResponseContent<'a> {
        &self.content
    }

    /// Return the answers of this response.
    pub fn answers(&self) -> &[Answer<'a>] {
        self.content.answers()
    }

    /// Return whether the solver reported `no models`.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self.content, ResponseContent::NoModels { .. })
    }
}

const CONTEXT: ParserContext = ParserContext::Response;

impl<'a> ResponseAST<'a> for Response<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.query);
        result.push(&self.content);

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
            pair(
                preceded(Token::query_header, Query::parse),
                ResponseContent::parse,
            ),
        )(input)
        .map(|(rest, (span, (query, content)))| {
            (
                rest,
                Self {
                    span,
                    query,
                    content,
                },
            )
        })
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{
            response::{Response, ResponseContent},
            ResponseAST,
        },
        ParserInput,
    };

    #[test]
    fn parse_no_models() {
        let (_, content) =
            all_consuming(ResponseContent::parse)(ParserInput::new("no models")).unwrap();
        assert!(matches!(content, ResponseContent::NoModels { .. }));
        assert!(content.answers().is_empty());

        let input = ParserInput::new("QUERY:?- mortal(zeus).\n\n\tno models\n");
        let (_, response) = Response::parse(input).unwrap();
        assert!(response.is_unsatisfiable());
        assert_eq!(response.query().statements().count(), 1);
    }

    #[test]
    fn parse_answers() {
        let input = "QUERY:?- p(X).

ANSWER: 1 (in 0.1 ms)

MODEL:
{ p(a) }

BINDINGS:
X = a

ANSWER: 2 (in 0.2 ms)

MODEL:
{ p(b) }

BINDINGS:
X = b
";
        let (rest, response) = Response::parse(ParserInput::new(input)).unwrap();

        assert!(rest.fragment().trim().is_empty());
        assert!(!response.is_unsatisfiable());
        let numbers = response
            .answers()
            .iter()
            .map(|answer| answer.number())
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn parse_query_without_answers() {
        let (_, response) = Response::parse(ParserInput::new("QUERY:?- p.")).unwrap();
        assert!(response.answers().is_empty());
        assert!(!response.is_unsatisfiable());
    }
}
