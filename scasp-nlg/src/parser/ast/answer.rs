//! This module defines [Answer]
#![allow(missing_docs)]

use nom::{
    combinator::opt,
    sequence::{delimited, preceded, tuple},
};

use crate::parser::{
    ast::{
        binding::BindingsSet, external_error, justification::Justification, model::Model,
        spanned, token::Token, ResponseAST,
    },
    context::ParserContext,
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing the time the solver took to find an answer, e.g. `(in 0.101 ms)`
#[derive(Debug)]
pub struct Runtime<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Reported number of milliseconds
    time: Token<'a>,
}

impl<'a> Runtime<'a> {
    /// Return the reported time as it was printed.
    pub fn text(&self) -> &'a str {
        self.time.text()
    }

    /// Return the reported time in milliseconds,
    /// if it is a valid number.
    pub fn milliseconds(&self) -> Option<f64> {
        self.text().parse().ok()
    }
}

impl<'a> ResponseAST<'a> for Runtime<'a> {
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
            ParserContext::Runtime,
            delimited(Token::runtime_open, Token::decimal, Token::runtime_close),
        )(input)
        .map(|(rest, (span, time))| (rest, Self { span, time }))
    }

    fn context(&self) -> ParserContext {
        ParserContext::Runtime
    }
}

/// AST node representing one answer set found by the solver
#[derive(Debug)]
pub struct Answer<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Number of the answer, starting with 1
    number: u64,
    /// Time the solver took to find this answer
    runtime: Runtime<'a>,
    /// Justification tree, only printed when requested from the solver
    justification: Option<Justification<'a>>,
    /// Statements holding in this answer
    model: Model<'a>,
    /// Values of the query variables
    bindings: BindingsSet<'a>,
}

impl<'a> Answer<'a> {
    /// Return the number of the answer.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Return the runtime annotation of the answer.
    pub fn runtime(&self) -> &Runtime<'a> {
        &self.runtime
    }

    /// Return the reported runtime in milliseconds, if it is a valid number.
    pub fn runtime_ms(&self) -> Option<f64> {
        self.runtime.milliseconds()
    }

    /// Return the justification tree, if present.
    pub fn justification(&self) -> Option<&Justification<'a>> {
        self.justification.as_ref()
    }

    /// Return the model of the answer.
    pub fn model(&self) -> &Model<'a> {
        &self.model
    }

    /// Return the variable bindings of the answer.
    pub fn bindings(&self) -> &BindingsSet<'a> {
        &self.bindings
    }

    fn parse_number(input: ParserInput<'a>) -> ParserResult<'a, u64> {
        let (rest, digits) = Token::digits(input)?;

        match digits.text().parse::<u64>() {
            Ok(number) => Ok((rest, number)),
            Err(error) => Err(nom::Err::Error(external_error(input, error))),
        }
    }
}

const CONTEXT: ParserContext = ParserContext::Answer;

impl<'a> ResponseAST<'a> for Answer<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.runtime);
        if let Some(justification) = &self.justification {
            result.push(justification);
        }
        result.push(&self.model);
        result.push(&self.bindings);

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
            tuple((
                preceded(Token::answer_header, Self::parse_number),
                Runtime::parse,
                opt(Justification::parse),
                Model::parse,
                BindingsSet::parse,
            )),
        )(input)
        .map(
            |(rest, (span, (number, runtime, justification, model, bindings)))| {
                (
                    rest,
                    Self {
                        span,
                        number,
                        runtime,
                        justification,
                        model,
                        bindings,
                    },
                )
            },
        )
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{answer::Answer, ResponseAST},
        ParserInput,
    };

    const ANSWER: &str = "ANSWER:\t1\t(in 7.265 ms)

JUSTIFICATION_TREE:
winner_of_game(1,testgame) :-
{{INDENT}}
    player(1),
    game(testgame).
{{DEDENT}}
global_constraint.

MODEL:
{ winner_of_game(1,testgame),  player(1),  game(testgame) }

BINDINGS:
Player = 1
Game = testgame";

    #[test]
    fn parse_answer() {
        let (_, answer) = all_consuming(Answer::parse)(ParserInput::new(ANSWER)).unwrap();

        assert_eq!(answer.number(), 1);
        assert_eq!(answer.runtime().text(), "7.265");
        assert_eq!(answer.runtime_ms(), Some(7.265));
        assert!(answer.justification().is_some());
        assert_eq!(answer.model().len(), 3);
        assert_eq!(answer.bindings().len(), 2);
    }

    #[test]
    fn parse_answer_without_justification() {
        let input = "ANSWER: 2 (in 0.101 ms)\n\nMODEL:\n{ p(a) }\n\nBINDINGS:";
        let (_, answer) = all_consuming(Answer::parse)(ParserInput::new(input)).unwrap();

        assert_eq!(answer.number(), 2);
        assert!(answer.justification().is_none());
        assert!(answer.bindings().is_empty());
    }

    #[test]
    fn malformed_runtime() {
        let input = "ANSWER: 1 (in 1.2.3 ms)\nMODEL:\n{ p }\nBINDINGS:";
        let (_, answer) = all_consuming(Answer::parse)(ParserInput::new(input)).unwrap();
        assert_eq!(answer.runtime_ms(), None);
    }

    #[test]
    fn reject_answer() {
        for input in [
            "ANSWER: 1\nMODEL:\n{ p }\nBINDINGS:",
            "ANSWER: 1 (in 1 ms)\nBINDINGS:",
            "ANSWER: 1 (in 1 ms)\nMODEL:\n{ p }",
        ] {
            let result = all_consuming(Answer::parse)(ParserInput::new(input));
            assert!(result.is_err(), "{input}");
        }
    }
}
