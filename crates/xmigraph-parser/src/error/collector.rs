//! Collector for accumulating diagnostics while loading a document.
//!
//! Recoverable problems (a bad attribute on one element) are collected so
//! that a single run reports all of them; structural problems stop the
//! loader immediately.

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Stop collecting with a fatal diagnostic.
    ///
    /// The returned error carries everything collected so far followed by
    /// `diagnostic`.
    pub fn abort(mut self, diagnostic: Diagnostic) -> ParseError {
        self.diagnostics.push(diagnostic);
        ParseError::new(self.diagnostics)
    }

    /// Finish collection and return a result.
    ///
    /// On success the collected warnings are handed back to the caller.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
