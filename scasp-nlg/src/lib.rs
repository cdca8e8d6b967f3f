//! Parsing of s(CASP) solver output and aggregation of its models
//! into natural-language explanations

#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    missing_copy_implementations,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod aggregate;
pub mod error;
pub mod fact;
pub mod nlg;
pub mod parser;
pub mod render;
pub mod solver_output;

pub use solver_output::{parse_models, SolverOutput};
