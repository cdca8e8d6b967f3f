//! This module defines all the errors that can occur while executing the CLI.

use thiserror::Error;

/// Error that occur during execution of the CLI app
#[derive(Error, Debug)]
pub enum CliError {
    /// Error while reading the response file
    #[error("unable to read `{filename}`: {error}")]
    Reading {
        /// Name of the response file
        filename: String,
        /// Underlying error
        error: std::io::Error,
    },
    /// Error while parsing the response file
    #[error("unable to parse response `{filename}`")]
    ResponseParsing {
        /// Name of the response file
        filename: String,
    },
    /// Error resulting from io operations
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originating from the library
    #[error(transparent)]
    NlgError(#[from] scasp_nlg::error::Error),
}
