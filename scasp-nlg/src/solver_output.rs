//! This module defines [SolverOutput], which owns the normalized text of a solver response.

use crate::{
    error::Error,
    fact::{extract_models, Fact},
    parser::{
        ast::response::Response,
        indent::{normalize, NormalizationError},
        ParseMode, Parser, ParserErrorReport,
    },
};

/// Normalized output of one solver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutput {
    /// Label of the output, usually the path of the file it was read from
    label: String,
    /// Text with explicit indentation markers
    text: String,
}

impl SolverOutput {
    /// Normalize the indentation of the given raw output.
    pub fn new(label: String, raw: &str) -> Result<Self, NormalizationError> {
        let text = normalize(raw)?;
        Ok(Self { label, text })
    }

    /// Return the label of this output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the normalized text.
    pub fn parse(&self, mode: ParseMode) -> Result<Response<'_>, ParserErrorReport<'_>> {
        Parser::initialize(&self.text, self.label.clone())
            .with_mode(mode)
            .parse()
    }
}

/// Parse raw solver output and return the facts of every model.
pub fn parse_models(label: &str, raw: &str) -> Result<Vec<Vec<Fact>>, Error> {
    let output = SolverOutput::new(label.to_owned(), raw)?;
    let response = output
        .parse(ParseMode::Strict)
        .map_err(ParserErrorReport::into_owned)?;

    Ok(extract_models(&response)?)
}

#[cfg(test)]
mod test {
    use test_log::test;

    use crate::{error::Error, parser::ParseMode};

    use super::{parse_models, SolverOutput};

    const OUTPUT: &str = "QUERY:?- winner(P,G).

ANSWER:\t1\t(in 2.1 ms)

JUSTIFICATION_TREE:
winner(a,g) :-
    player(a),
    game(g).
global_constraint.

MODEL:
{ winner(a,g),  player(a),  game(g) }

BINDINGS:
P = a
G = g
";

    #[test]
    fn normalize_and_parse() {
        let output = SolverOutput::new("winner.txt".to_owned(), OUTPUT).unwrap();
        assert!(output.text().contains("{{INDENT}}"));
        assert_eq!(output.label(), "winner.txt");

        let response = output.parse(ParseMode::Strict).unwrap();
        let answer = &response.answers()[0];
        assert_eq!(answer.justification().map(|tree| tree.reasons().len()), Some(2));
    }

    #[test]
    fn models() {
        let models = parse_models("winner.txt", OUTPUT).unwrap();

        let shown = models[0].iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(shown, vec!["winner(a,g)", "player(a)", "game(g)"]);
    }

    #[test]
    fn errors_are_owned() {
        assert!(matches!(
            parse_models("bad.txt", "QUERY:?- p.\nMODEL:"),
            Err(Error::Grammar(_))
        ));
        assert!(matches!(
            parse_models("bad.txt", "a\n    b\n  c"),
            Err(Error::Normalization(_))
        ));
        assert!(matches!(
            parse_models(
                "bad.txt",
                "QUERY:?- p.\nANSWER: 1 (in 1 ms)\nMODEL:\n{ not p(a) }\nBINDINGS:"
            ),
            Err(Error::Fact(_))
        ));
    }
}
