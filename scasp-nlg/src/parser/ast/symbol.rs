//! This module defines [Symbol]
#![allow(missing_docs)]

use nom::combinator::map;

use crate::parser::{
    ast::{atom::Atom, exclusive, variable::Variable, ResponseAST},
    context::{context, ParserContext},
    span::Span,
    ParserInput, ParserResult,
};

/// AST node representing either a constant or a variable,
/// as found on either side of a constraint or binding
#[derive(Debug)]
pub enum Symbol<'a> {
    /// Constant
    Atom(Atom<'a>),
    /// Variable
    Variable(Variable<'a>),
}

impl<'a> Symbol<'a> {
    fn ast_node(&self) -> &dyn ResponseAST<'a> {
        match self {
            Symbol::Atom(atom) => atom,
            Symbol::Variable(variable) => variable,
        }
    }
}

const CONTEXT: ParserContext = ParserContext::Symbol;

impl<'a> ResponseAST<'a> for Symbol<'a> {
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
            exclusive(
                CONTEXT,
                map(Atom::parse, Symbol::Atom),
                map(Variable::parse, Symbol::Variable),
            ),
        )(input)
    }

    fn context(&self) -> ParserContext {
        CONTEXT
    }
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Atom(atom) => write!(f, "{atom}"),
            Symbol::Variable(variable) => write!(f, "{variable}"),
        }
    }
}

#[cfg(test)]
mod test {
    use nom::combinator::all_consuming;

    use crate::parser::{
        ast::{symbol::Symbol, ResponseAST},
        ParserInput,
    };

    #[test]
    fn parse_symbol() {
        let test = vec![
            ("testgame", true),
            ("-x", true),
            ("Game", false),
            ("_", false),
        ];

        for (input, is_atom) in test {
            let (_, symbol) = all_consuming(Symbol::parse)(ParserInput::new(input)).unwrap();
            assert_eq!(matches!(symbol, Symbol::Atom(_)), is_atom, "{input}");
            assert_eq!(symbol.to_string(), input);
        }
    }
}
