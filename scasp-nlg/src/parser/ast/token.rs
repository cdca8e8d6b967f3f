//! This module defines [Token].
#![allow(missing_docs)]

use enum_assoc::Assoc;

use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{digit1, multispace0, multispace1, satisfy},
    combinator::{map, peek, recognize},
    sequence::{pair, preceded, terminated},
};

use crate::parser::{
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// Line inserted by the indent normalizer where the nesting level increases
pub const INDENT_MARKER: &str = "{{INDENT}}";
/// Line inserted by the indent normalizer where the nesting level decreases
pub const DEDENT_MARKER: &str = "{{DEDENT}}";

/// Enumeration of all accepted kinds of [Token]s
#[derive(Assoc, Debug, Clone, Copy, PartialEq, Eq)]
#[func(pub fn name(&self) -> &'static str)]
pub enum TokenKind {
    /// Open parenthesis
    #[assoc(name = "(")]
    OpenParenthesis,
    /// Closed parenthesis
    #[assoc(name = ")")]
    ClosedParenthesis,
    /// Open brace
    #[assoc(name = "{")]
    OpenBrace,
    /// Closed brace
    #[assoc(name = "}")]
    ClosedBrace,
    /// Comma
    #[assoc(name = ",")]
    Comma,
    /// Dot, terminates queries and lists of reasons
    #[assoc(name = ".")]
    Dot,
    /// Bar, introduces the constraints of a variable
    #[assoc(name = "|")]
    Bar,
    /// Minus, used for classical negation
    #[assoc(name = "-")]
    Minus,
    /// Underscore, used for silent variables
    #[assoc(name = "_")]
    Underscore,
    /// Equal
    #[assoc(name = "=")]
    Equal,
    /// Unequal
    #[assoc(name = "\\=")]
    Unequal,
    /// Implication, separates a conclusion from its reasons
    #[assoc(name = ":-")]
    Implication,
    /// Query prompt
    #[assoc(name = "?-")]
    QueryPrompt,
    /// Negation as failure
    #[assoc(name = "not")]
    Not,
    /// Marker for an increased indentation level
    #[assoc(name = INDENT_MARKER)]
    Indent,
    /// Marker for a decreased indentation level
    #[assoc(name = DEDENT_MARKER)]
    Dedent,
    /// Header of the query section
    #[assoc(name = "QUERY:")]
    QueryHeader,
    /// Header of an answer
    #[assoc(name = "ANSWER:")]
    AnswerHeader,
    /// Header of a justification tree
    #[assoc(name = "JUSTIFICATION_TREE:")]
    JustificationHeader,
    /// Header of a model
    #[assoc(name = "MODEL:")]
    ModelHeader,
    /// Header of the bindings section
    #[assoc(name = "BINDINGS:")]
    BindingsHeader,
    /// Response of a query without answers
    #[assoc(name = "no models")]
    NoModels,
    /// Start of a runtime annotation
    #[assoc(name = "(in")]
    RuntimeOpen,
    /// End of a runtime annotation
    #[assoc(name = "ms)")]
    RuntimeClose,
    /// Lowercase or digit-leading identifier
    #[assoc(name = "name")]
    Name,
    /// Uppercase-leading identifier
    #[assoc(name = "variable name")]
    VariableName,
    /// Digits
    #[assoc(name = "digits")]
    Digits,
    /// Digits interspersed with dots
    #[assoc(name = "number")]
    Decimal,
}

/// A token is the smallest unit recognized by the parser
/// that is used to built up more complex expressions
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// The kind of token
    kind: TokenKind,
}

/// Characters that end an identifier
const STRUCTURAL: &str = "(),#.:%{}=\\|";

/// Whether the given character may continue an identifier.
pub(crate) fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !STRUCTURAL.contains(c)
}

/// Parse an identifier starting with a character accepted by `start`,
/// without skipping whitespace.
fn identifier<'a>(
    start: fn(char) -> bool,
) -> impl FnMut(ParserInput<'a>) -> ParserResult<'a, ParserInput<'a>> {
    recognize(pair(satisfy(start), take_while(is_identifier_char)))
}

/// Macro for generating token parser functions
macro_rules! string_token {
    ($func_name: ident, $token: expr) => {
        /// Parse this token, skipping preceding whitespace.
        pub fn $func_name(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
            map(
                preceded(
                    multispace0,
                    context(ParserContext::Token { kind: $token }, tag($token.name())),
                ),
                |input: ParserInput<'a>| Token {
                    span: input.into(),
                    kind: $token,
                },
            )(input)
        }
    };
}

impl<'a> Token<'a> {
    /// Return the [Span] of this token.
    pub fn span(&self) -> Span<'a> {
        self.span
    }

    /// Return the [TokenKind] of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Return the underlying text.
    pub fn text(&self) -> &'a str {
        self.span.fragment()
    }

    /// Parse [TokenKind::Name] directly at the start of the input.
    pub fn name_immediate(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        context(
            ParserContext::token(TokenKind::Name),
            identifier(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::Name,
                },
            )
        })
    }

    /// Parse [TokenKind::Name].
    pub fn name(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        preceded(multispace0, Self::name_immediate)(input)
    }

    /// Parse [TokenKind::VariableName].
    pub fn variable_name(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        preceded(
            multispace0,
            context(
                ParserContext::token(TokenKind::VariableName),
                identifier(|c| c.is_ascii_uppercase()),
            ),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::VariableName,
                },
            )
        })
    }

    /// Parse [TokenKind::Not], which must be followed by whitespace.
    pub fn not(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        preceded(
            multispace0,
            context(
                ParserContext::token(TokenKind::Not),
                terminated(tag(TokenKind::Not.name()), peek(multispace1)),
            ),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::Not,
                },
            )
        })
    }

    /// Parse [TokenKind::Digits].
    pub fn digits(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        preceded(
            multispace0,
            context(ParserContext::token(TokenKind::Digits), digit1),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::Digits,
                },
            )
        })
    }

    /// Parse [TokenKind::Decimal].
    pub fn decimal(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        preceded(
            multispace0,
            context(
                ParserContext::token(TokenKind::Decimal),
                take_while1(|c: char| c.is_ascii_digit() || c == '.'),
            ),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::Decimal,
                },
            )
        })
    }

    /// Parse [TokenKind::Minus] directly at the start of the input.
    pub fn minus_immediate(input: ParserInput<'a>) -> ParserResult<'a, Token<'a>> {
        context(
            ParserContext::token(TokenKind::Minus),
            tag(TokenKind::Minus.name()),
        )(input)
        .map(|(rest, result)| {
            (
                rest,
                Token {
                    span: result.into(),
                    kind: TokenKind::Minus,
                },
            )
        })
    }

    string_token!(open_parenthesis, TokenKind::OpenParenthesis);
    string_token!(closed_parenthesis, TokenKind::ClosedParenthesis);
    string_token!(open_brace, TokenKind::OpenBrace);
    string_token!(closed_brace, TokenKind::ClosedBrace);
    string_token!(comma, TokenKind::Comma);
    string_token!(dot, TokenKind::Dot);
    string_token!(bar, TokenKind::Bar);
    string_token!(underscore, TokenKind::Underscore);
    string_token!(equal, TokenKind::Equal);
    string_token!(unequal, TokenKind::Unequal);
    string_token!(implication, TokenKind::Implication);
    string_token!(query_prompt, TokenKind::QueryPrompt);
    string_token!(indent, TokenKind::Indent);
    string_token!(dedent, TokenKind::Dedent);
    string_token!(query_header, TokenKind::QueryHeader);
    string_token!(answer_header, TokenKind::AnswerHeader);
    string_token!(justification_header, TokenKind::JustificationHeader);
    string_token!(model_header, TokenKind::ModelHeader);
    string_token!(bindings_header, TokenKind::BindingsHeader);
    string_token!(no_models, TokenKind::NoModels);
    string_token!(runtime_open, TokenKind::RuntimeOpen);
    string_token!(runtime_close, TokenKind::RuntimeClose);
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::token::{Token, TokenKind},
        ParserInput,
    };

    #[test]
    fn parse_names() {
        let test = vec![
            ("atom_34", true),
            ("123werg", true),
            ("A34", false),
            ("test(this", false),
            ("_", false),
        ];

        for (input, expected) in test {
            let result = all_consuming(Token::name)(ParserInput::new(input));
            assert_eq!(result.is_ok(), expected, "{input}");
        }
    }

    #[test]
    fn parse_variable_names() {
        let test = vec![("Test", true), ("test", false), ("Te%st", false)];

        for (input, expected) in test {
            let result = all_consuming(Token::variable_name)(ParserInput::new(input));
            assert_eq!(result.is_ok(), expected, "{input}");
        }
    }

    #[test]
    fn tokens_skip_whitespace() {
        let (rest, token) = Token::answer_header(ParserInput::new("\t ANSWER:\t1")).unwrap();
        assert_eq!(token.kind(), TokenKind::AnswerHeader);
        assert_eq!(token.text(), "ANSWER:");
        assert_eq!(*rest.fragment(), "\t1");
    }

    #[test]
    fn not_requires_whitespace() {
        assert!(Token::not(ParserInput::new("not p")).is_ok());
        assert!(Token::not(ParserInput::new("nothing")).is_err());
    }
}
