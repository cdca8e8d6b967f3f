//! This module defines the trees handed to a [Renderer]
//! and the functions that build them from the models of a response.

use std::fmt::Display;

use thiserror::Error;

use crate::{
    aggregate::{
        aggregate_all, aggregate_by_predicate, aggregate_by_subject, group_by, AggregationError,
        Proposition,
    },
    fact::Fact,
    render::{RenderError, Renderer},
};

/// Errors that occur while building an explanation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NlgError {
    /// No models were given
    #[error("cannot explain an empty list of models")]
    NoModels,
    /// A model does not contain a conclusion
    #[error("model {index} is empty and has no conclusion")]
    EmptyModel {
        /// Position of the model in the input (starting with 1)
        index: usize,
    },
    /// The models do not agree on their conclusion
    #[error("models disagree on their conclusion: {}", .conclusions.join(", "))]
    ConclusionMismatch {
        /// Conclusion of every model
        conclusions: Vec<String>,
    },
    /// Aggregating the evidence failed
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// Rendering hint attached to a list of statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Typography {
    /// One statement per line
    Bulleted,
    /// All statements within one sentence
    Inline,
}

/// Tree structure of an explanation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NlgTree {
    /// Single statement
    Proposition(Proposition),
    /// All of the statements hold
    Conjunction(Typography, Vec<NlgTree>),
    /// One of the statements holds
    Disjunction(Typography, Vec<NlgTree>),
    /// The conclusion holds because of the condition
    IfThen {
        /// Statement that is explained
        conclusion: Box<NlgTree>,
        /// Statement explaining it
        condition: Box<NlgTree>,
    },
}

impl NlgTree {
    /// Create a tree consisting of a single fact.
    pub fn fact(fact: Fact) -> Self {
        Self::Proposition(Proposition::Fact(fact))
    }
}

fn fmt_list(
    f: &mut std::fmt::Formatter<'_>,
    items: &[NlgTree],
    separator: &str,
) -> std::fmt::Result {
    f.write_str("(")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}

impl Display for NlgTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NlgTree::Proposition(proposition) => write!(f, "{proposition}"),
            NlgTree::Conjunction(_, items) => fmt_list(f, items, ", "),
            NlgTree::Disjunction(_, items) => fmt_list(f, items, "; "),
            NlgTree::IfThen {
                conclusion,
                condition,
            } => write!(f, "{conclusion} :- {condition}"),
        }
    }
}

/// Explanation of a conclusion shared by several models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Conclusion of all models
    conclusion: Fact,
    /// Evidence occurring in more than one model
    shared: NlgTree,
    /// Remaining evidence of each model
    alternatives: NlgTree,
}

impl Explanation {
    /// Return the conclusion of the explanation.
    pub fn conclusion(&self) -> &Fact {
        &self.conclusion
    }

    /// Return the aggregated shared evidence.
    pub fn shared(&self) -> &NlgTree {
        &self.shared
    }

    /// Return the disjunction of the per-model evidence.
    pub fn alternatives(&self) -> &NlgTree {
        &self.alternatives
    }

    /// Render the parts of the explanation and join them into one text.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        language: &str,
    ) -> Result<String, RenderError> {
        let conclusion = renderer.render(&NlgTree::fact(self.conclusion.clone()), language)?;
        let shared = renderer.render(&self.shared, language)?;
        let alternatives = renderer.render(&self.alternatives, language)?;

        Ok(format!(
            "{conclusion},\nif all of the following hold:\n{shared}\nand one of the following holds:\n{alternatives}"
        ))
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} :- {}, {}",
            self.conclusion, self.shared, self.alternatives
        )
    }
}

/// Split a model into its conclusion and its evidence.
fn split_model(index: usize, model: &[Fact]) -> Result<(&Fact, &[Fact]), NlgError> {
    model
        .split_first()
        .ok_or(NlgError::EmptyModel { index: index + 1 })
}

/// Explain a conclusion supported by several models.
///
/// Each model starts with the conclusion, followed by its evidence.
/// Evidence occurring more than once across all models is aggregated
/// into one bulleted list; the rest of each model's evidence
/// becomes one alternative of a bulleted disjunction.
pub fn nlg_models(models: &[Vec<Fact>]) -> Result<Explanation, NlgError> {
    let split = models
        .iter()
        .enumerate()
        .map(|(index, model)| split_model(index, model))
        .collect::<Result<Vec<_>, _>>()?;

    let (conclusion, _) = split.first().ok_or(NlgError::NoModels)?;
    let canonical = conclusion.to_string();
    if split.iter().any(|(other, _)| other.to_string() != canonical) {
        return Err(NlgError::ConclusionMismatch {
            conclusions: split.iter().map(|(other, _)| other.to_string()).collect(),
        });
    }

    let pool = split
        .iter()
        .flat_map(|(_, evidence)| evidence.iter().cloned())
        .collect::<Vec<_>>();
    let shared = group_by(pool, ToString::to_string)
        .into_iter()
        .filter(|group| group.len() > 1)
        .filter_map(|mut group| group.pop())
        .collect::<Vec<_>>();
    log::debug!("{} models share {} facts", split.len(), shared.len());

    let alternatives = split
        .iter()
        .map(|(_, evidence)| {
            let unique = evidence
                .iter()
                .filter(|fact| !shared.contains(fact))
                .cloned()
                .collect();
            aggregate_all(unique, Typography::Inline)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Explanation {
        conclusion: (*conclusion).clone(),
        shared: aggregate_all(shared, Typography::Bulleted)?,
        alternatives: NlgTree::Disjunction(Typography::Bulleted, alternatives),
    })
}

/// Explain the conclusion of a single model by all of its evidence.
pub fn nlg_single_model(model: &[Fact]) -> Result<NlgTree, NlgError> {
    let (conclusion, evidence) = split_model(0, model)?;

    let propositions = evidence.iter().cloned().map(Proposition::from).collect();
    let aggregated = aggregate_by_subject(aggregate_by_predicate(propositions)?)?;

    Ok(NlgTree::IfThen {
        conclusion: Box::new(NlgTree::fact(conclusion.clone())),
        condition: Box::new(NlgTree::Conjunction(
            Typography::Bulleted,
            aggregated.into_iter().map(NlgTree::Proposition).collect(),
        )),
    })
}
