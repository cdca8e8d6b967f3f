//! Error-handling module for the crate

use thiserror::Error;

use crate::{
    aggregate::AggregationError,
    fact::FactError,
    nlg::NlgError,
    parser::{error::GrammarError, indent::NormalizationError},
    render::{LexiconError, RenderError},
};

/// Error-Collection for all the errors of this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// Indentation of the solver output is inconsistent
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    /// Solver output does not follow the grammar
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// Model entry cannot be turned into a fact
    #[error(transparent)]
    Fact(#[from] FactError),
    /// Aggregation of facts failed
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    /// Building an explanation failed
    #[error(transparent)]
    Nlg(#[from] NlgError),
    /// Rendering an explanation failed
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Loading a lexicon failed
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
