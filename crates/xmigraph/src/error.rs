//! Error types for xmigraph operations.
//!
//! Navigation itself never fails; errors only come from loading a
//! document, reading files, configuration, and rendering reports.

use std::io;

use thiserror::Error;

use xmigraph_parser::error::ParseError;

/// The main error type for xmigraph operations.
///
/// The `Parse` variant keeps the source text next to the loader's
/// diagnostics so that callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum XmiGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl From<serde_json::Error> for XmiGraphError {
    fn from(error: serde_json::Error) -> Self {
        Self::Report(error.to_string())
    }
}

impl XmiGraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
