//! Error and diagnostic system for the document loader.
//!
//! Loading a document either yields an element tree or a [`ParseError`]
//! holding one or more [`Diagnostic`]s. Each diagnostic carries an
//! [`ErrorCode`], labeled byte spans into the source, and optional help.
//!
//! # Example
//!
//! ```
//! # use xmigraph_parser::error::{Diagnostic, ErrorCode};
//! # use xmigraph_parser::Span;
//!
//! let close = Span::new(40..46);
//! let open = Span::new(0..7);
//!
//! let diag = Diagnostic::error("expected `</model>`, found `</node>`")
//!     .with_code(ErrorCode::E002)
//!     .with_label(close, "mismatched end tag")
//!     .with_secondary_label(open, "element opened here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
