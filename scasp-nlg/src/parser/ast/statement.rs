//! This module defines [Statement] and [NafTerm]
#![allow(missing_docs)]

use nom::{branch::alt, combinator::map, sequence::preceded};

use crate::parser::{
    ast::{constraint::Constraint, spanned, term::Term, token::Token, ResponseAST},
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing a term under negation as failure, e.g. `not beats(X, Y)`
#[derive(Debug)]
pub struct NafTerm<'a> {
    /// [Span] associated with this node
    span: Span<'a>,

    /// Negated term
    term: Term<'a>,
}

impl<'a> NafTerm<'a> {
    /// Return the negated term.
    pub fn term(&self) -> &Term<'a> {
        &self.term
    }
}

impl<'a> ResponseAST<'a> for NafTerm<'a> {
    fn children(&self) -> Vec<&dyn ResponseAST<'a>> {
        let mut result = Vec::<&dyn ResponseAST<'a>>::new();
        result.push(&self.term);

        result
    }

    fn span(&self) -> Span<'a> {
        self.span
    }

    fn parse(input: ParserInput<'a>) -> ParserResult<'a, Self>
    where
        Self: Sized + 'a,
    {
        spanned(ParserContext::NafTerm, preceded(Token::not, Term::parse))(input)
            .map(|(rest, (span, term))| (rest, Self { span, term }))
    }

    fn context(&self) -> ParserContext {
        ParserContext::NafTerm
    }
}

/// AST node representing a statement,
/// the unit of queries, models and justifications
#[derive(Debug)]
pub enum Statement<'a> {
    /// Negation as failure
    Naf(NafTerm<'a>),
    /// Term
    Term(Term<'a>),
    /// Constraint
    Constraint(Constraint<'a>),
}

impl<'a> Statement<'a> {
    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Statement::Naf(naf) => naf,
            Statement::Term(term) => term,
            Statement::Constraint(constraint) => constraint,
        }
    }
}

const CONTEXT: ParserContext = ParserContext::Statement;

impl<'a> ResponseAST<'a> for Statement<'a> {
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
            CONTEXT,
            alt((
                map(NafTerm::parse, Statement::Naf),
                map(Term::parse, Statement::Term),
                map(Constraint::parse, Statement::Constraint),
            )),
        )(input)
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

impl std::fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Naf(naf) => write!(f, "not {}", naf.term()),
            Statement::Term(term) => write!(f, "{term}"),
            Statement::Constraint(constraint) => write!(f, "{constraint}"),
        }
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{statement::Statement, ResponseAST},
        ParserInput,
    };

    #[test]
    fn parse_statement() {
        let test = vec![
            ("not beats(Y, X)", "not beats(Y,X)"),
            ("wins(a, rps)", "wins(a,rps)"),
            ("X \\= paper", "X \\= paper"),
            ("nothing", "nothing"),
            ("-player(b)", "-player(b)"),
        ];

        for (input, expected) in test {
            let result = all_consuming(Statement::parse)(ParserInput::new(input));

            assert!(result.is_ok(), "{input}");
            assert_eq!(result.unwrap().1.to_string(), expected);
        }
    }

    #[test]
    fn statement_kinds() {
        let (_, naf) = Statement::parse(ParserInput::new("not p")).unwrap();
        assert!(matches!(naf, Statement::Naf(_)));

        let (_, term) = Statement::parse(ParserInput::new("notp")).unwrap();
        assert!(matches!(term, Statement::Term(_)));

        let (_, constraint) = Statement::parse(ParserInput::new("A = b")).unwrap();
        assert!(matches!(constraint, Statement::Constraint(_)));
    }
}
