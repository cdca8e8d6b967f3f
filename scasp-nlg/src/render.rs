//! This module defines the [Renderer] boundary
//! and [EnglishRenderer], which turns [NlgTree]s into English text.

use std::{
    collections::HashMap,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    aggregate::{AggregateFact, Predicate, Proposition, Subject},
    fact::Argument,
    nlg::{NlgTree, Typography},
};

/// Errors that occur while rendering an [NlgTree]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The lexicon has no entry for a predicate
    #[error("no lexicon entry for predicate `{functor}`")]
    UnknownPredicate {
        /// Name of the predicate
        functor: String,
    },
    /// The renderer does not support the requested language
    #[error("language `{language}` is not supported, expected `{supported}`")]
    UnsupportedLanguage {
        /// Requested language
        language: String,
        /// Language supported by the renderer
        supported: String,
    },
}

/// Errors that occur while loading a [Lexicon]
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon file could not be read
    #[error("could not read lexicon `{path}`: {source}")]
    Io {
        /// Path of the lexicon file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The lexicon is not valid
    #[error("malformed lexicon: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns explanation trees into text
pub trait Renderer {
    /// Render the given tree in the given language.
    fn render(&self, tree: &NlgTree, language: &str) -> Result<String, RenderError>;
}

/// Lexicon entry of a predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateEntry {
    /// Whether the entry is a noun phrase or adjective that needs `is`/`are`
    #[serde(default)]
    pub copula: bool,
    /// Form used with a single subject, e.g. `throws` or `a player`
    pub singular: String,
    /// Form used with several subjects, e.g. `throw` or `players`
    pub plural: String,
}

/// Words used by [EnglishRenderer]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Entries by predicate name
    #[serde(default)]
    pub predicates: HashMap<String, PredicateEntry>,
    /// Display names of atoms, atoms without entry are printed as they are
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl Lexicon {
    /// Parse a lexicon from JSON.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a lexicon from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let json = read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lexicon = Self::from_json(&json)?;
        log::debug!(
            "loaded lexicon with {} predicates and {} names",
            lexicon.predicates.len(),
            lexicon.names.len()
        );

        Ok(lexicon)
    }
}

/// Connective joining the last two items of a list
#[derive(Debug, Clone, Copy)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn text(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}

/// Join items as `a, b and c`.
fn join_inline(items: &[String], connective: Connective) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), connective.text(), last),
    }
}

/// Put each item on its own line, as in
/// ```text
/// * a,
/// * b and
/// * c
/// ```
fn join_bulleted(items: &[String], connective: Connective) -> String {
    let count = items.len();

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let suffix = if index + 2 < count {
                ",".to_owned()
            } else if index + 2 == count {
                format!(" {}", connective.text())
            } else {
                String::new()
            };

            format!("* {item}{suffix}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Language identifier of [EnglishRenderer]
pub const ENGLISH: &str = "Eng";

/// Renders trees as English sentences using a [Lexicon]
#[derive(Debug, Clone, Default)]
pub struct EnglishRenderer {
    lexicon: Lexicon,
}

impl EnglishRenderer {
    /// Create a new [EnglishRenderer].
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Return the lexicon of this renderer.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn argument(&self, argument: &Argument) -> String {
        match argument {
            Argument::Atom(atom) => self.lexicon.names.get(atom).unwrap_or(atom).clone(),
            Argument::Variable(name) => name.clone(),
        }
    }

    fn subject(&self, subject: &Subject) -> String {
        let arguments = subject
            .arguments()
            .iter()
            .map(|argument| self.argument(argument))
            .collect::<Vec<_>>();

        join_inline(&arguments, Connective::And)
    }

    /// Look up a predicate, falling back to the entry without classical negation.
    fn entry(&self, functor: &str) -> Result<(&PredicateEntry, bool), RenderError> {
        if let Some(entry) = self.lexicon.predicates.get(functor) {
            return Ok((entry, false));
        }

        functor
            .strip_prefix('-')
            .and_then(|positive| self.lexicon.predicates.get(positive))
            .map(|entry| (entry, true))
            .ok_or_else(|| RenderError::UnknownPredicate {
                functor: functor.to_owned(),
            })
    }

    fn copula(plural: bool, negated: bool) -> &'static str {
        match (plural, negated) {
            (false, false) => "is",
            (true, false) => "are",
            (false, true) => "is not",
            (true, true) => "are not",
        }
    }

    /// Render a predicate without its copula,
    /// or without its auxiliary for negated verbs.
    fn predicate_body(&self, predicate: &Predicate, plural: bool) -> Result<String, RenderError> {
        let (entry, negated) = self.entry(predicate.functor())?;

        let word = if plural || (negated && !entry.copula) {
            &entry.plural
        } else {
            &entry.singular
        };

        Ok(match predicate.object() {
            Some(object) => format!("{word} {}", self.argument(object)),
            None => word.clone(),
        })
    }

    /// Render a predicate as a verb phrase agreeing with the subject.
    fn verb_phrase(&self, predicate: &Predicate, plural: bool) -> Result<String, RenderError> {
        let (entry, negated) = self.entry(predicate.functor())?;
        let body = self.predicate_body(predicate, plural)?;

        Ok(match (entry.copula, negated) {
            (true, _) => format!("{} {body}", Self::copula(plural, negated)),
            (false, false) => body,
            (false, true) if plural => format!("do not {body}"),
            (false, true) => format!("does not {body}"),
        })
    }

    fn pair(
        &self,
        first: &Predicate,
        second: &Predicate,
        plural: bool,
    ) -> Result<String, RenderError> {
        let (first_entry, first_negated) = self.entry(first.functor())?;
        let (second_entry, second_negated) = self.entry(second.functor())?;

        if first_entry.copula && second_entry.copula && first_negated == second_negated {
            return Ok(format!(
                "{} {} and {}",
                Self::copula(plural, first_negated),
                self.predicate_body(first, plural)?,
                self.predicate_body(second, plural)?
            ));
        }

        Ok(format!(
            "{} and {}",
            self.verb_phrase(first, plural)?,
            self.verb_phrase(second, plural)?
        ))
    }

    fn proposition(&self, proposition: &Proposition) -> Result<String, RenderError> {
        let subject = proposition.subject();
        let plural = subject.is_plural();

        let phrase = match proposition {
            Proposition::Fact(_) | Proposition::Aggregate(AggregateFact::ByPredicate { .. }) => {
                let predicate = proposition.predicate().map_err(|_| {
                    RenderError::UnknownPredicate {
                        functor: proposition.to_string(),
                    }
                })?;
                self.verb_phrase(&predicate, plural)?
            }
            Proposition::Aggregate(AggregateFact::BySubject { first, second, .. }) => {
                self.pair(first, second, plural)?
            }
        };

        Ok(format!("{} {phrase}", self.subject(&subject)))
    }

    fn list(
        &self,
        typography: Typography,
        items: &[NlgTree],
        connective: Connective,
    ) -> Result<String, RenderError> {
        let rendered = items
            .iter()
            .map(|item| self.tree(item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match typography {
            Typography::Bulleted => join_bulleted(&rendered, connective),
            Typography::Inline => join_inline(&rendered, connective),
        })
    }

    fn tree(&self, tree: &NlgTree) -> Result<String, RenderError> {
        match tree {
            NlgTree::Proposition(proposition) => self.proposition(proposition),
            NlgTree::Conjunction(typography, items) => {
                self.list(*typography, items, Connective::And)
            }
            NlgTree::Disjunction(typography, items) => {
                self.list(*typography, items, Connective::Or)
            }
            NlgTree::IfThen {
                conclusion,
                condition,
            } => Ok(format!(
                "{} if\n{}",
                self.tree(conclusion)?,
                self.tree(condition)?
            )),
        }
    }
}

impl Renderer for EnglishRenderer {
    fn render(&self, tree: &NlgTree, language: &str) -> Result<String, RenderError> {
        if language != ENGLISH {
            return Err(RenderError::UnsupportedLanguage {
                language: language.to_owned(),
                supported: ENGLISH.to_owned(),
            });
        }

        self.tree(tree)
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use crate::{
        fact::{Argument, Fact},
        nlg::{nlg_models, nlg_single_model, NlgTree, Typography},
    };

    use super::{
        join_bulleted, join_inline, Connective, EnglishRenderer, Lexicon, RenderError, Renderer,
        ENGLISH,
    };

    const LEXICON: &str = r#"{
        "predicates": {
            "wins": { "singular": "wins", "plural": "win" },
            "game": { "copula": true, "singular": "a game", "plural": "games" },
            "player": { "copula": true, "singular": "a player", "plural": "players" },
            "participant_in": { "copula": true, "singular": "a participant in", "plural": "participants in" },
            "throws": { "singular": "throws", "plural": "throw" },
            "beats": { "singular": "beats", "plural": "beat" }
        },
        "names": { "a": "A", "c": "C", "rps": "RPS" }
    }"#;

    fn renderer() -> EnglishRenderer {
        EnglishRenderer::new(Lexicon::from_json(LEXICON).unwrap())
    }

    fn atom(name: &str) -> Argument {
        Argument::Atom(name.to_owned())
    }

    fn rps_model(first: &str, second: &str) -> Vec<Fact> {
        vec![
            Fact::binary("wins", atom("a"), atom("rps")),
            Fact::unary("game", atom("rps")),
            Fact::binary("participant_in", atom("a"), atom("rps")),
            Fact::unary("player", atom("a")),
            Fact::binary("throws", atom("a"), atom(first)),
            Fact::unary("player", atom("c")),
            Fact::binary("participant_in", atom("c"), atom("rps")),
            Fact::binary("throws", atom("c"), atom(second)),
            Fact::binary("beats", atom(first), atom(second)),
        ]
    }

    #[test]
    fn joins() {
        let items = ["x", "y", "z"].map(String::from);

        assert_eq!(join_inline(&items, Connective::And), "x, y and z");
        assert_eq!(join_inline(&items[..1], Connective::Or), "x");
        assert_eq!(join_bulleted(&items, Connective::Or), "* x,\n* y or\n* z");
        assert_eq!(join_bulleted(&[], Connective::And), "");
    }

    #[test]
    fn render_explanation() {
        let models = vec![
            rps_model("rock", "scissors"),
            rps_model("scissors", "paper"),
            rps_model("paper", "rock"),
        ];
        let explanation = nlg_models(&models).unwrap();

        let expected = "A wins RPS,
if all of the following hold:
* A and C are participants in RPS and players and
* RPS is a game
and one of the following holds:
* A throws rock, C throws scissors and rock beats scissors,
* A throws scissors, C throws paper and scissors beats paper or
* A throws paper, C throws rock and paper beats rock";

        assert_eq!(explanation.render(&renderer(), ENGLISH).unwrap(), expected);
    }

    #[test]
    fn render_single_model() {
        let tree = nlg_single_model(&rps_model("rock", "scissors")).unwrap();

        let expected = "A wins RPS if
* A and C are participants in RPS and players,
* A throws rock,
* C throws scissors,
* rock beats scissors and
* RPS is a game";

        assert_eq!(renderer().render(&tree, ENGLISH).unwrap(), expected);
    }

    #[test]
    fn render_negation() {
        let tree = NlgTree::Conjunction(
            Typography::Inline,
            vec![
                NlgTree::fact(Fact::unary("-player", atom("rps"))),
                NlgTree::fact(Fact::binary("-throws", atom("a"), atom("paper"))),
            ],
        );

        assert_eq!(
            renderer().render(&tree, ENGLISH).unwrap(),
            "RPS is not a player and A does not throw paper"
        );
    }

    #[test]
    fn unknown_predicate() {
        let tree = NlgTree::fact(Fact::unary("referee", atom("b")));

        assert_eq!(
            renderer().render(&tree, ENGLISH),
            Err(RenderError::UnknownPredicate {
                functor: "referee".to_owned()
            })
        );
    }

    #[test]
    fn unsupported_language() {
        let tree = NlgTree::fact(Fact::unary("player", atom("a")));

        assert!(matches!(
            renderer().render(&tree, "Fre"),
            Err(RenderError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn malformed_lexicon() {
        assert!(Lexicon::from_json(r#"{ "predicates": { "p": { "copula": true } } }"#).is_err());
        assert_eq!(Lexicon::from_json("{}").unwrap(), Lexicon::default());
    }
}
