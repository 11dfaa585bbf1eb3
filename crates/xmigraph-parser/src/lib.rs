//! # xmigraph Parser
//!
//! Loader for XMI-style model documents. The loader turns markup text into
//! a plain [`Element`] tree: tag names, attributes in document order, and
//! ordered children. It interprets no namespace, schema or DTD semantics;
//! decoding the model conventions layered on the attributes is left to the
//! `xmigraph` crate.
//!
//! ## Usage
//!
//! ```
//! # use xmigraph_parser::{load, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <root>
//!             <node id="m1" isMeta="true" atr-name="State"/>
//!         </root>
//!     "#;
//!
//!     let root = load(source)?;
//!     assert_eq!(root.children()[0].attribute("atr-name"), Some("State"));
//!     Ok(())
//! }
//! ```

pub mod error;

mod element;
mod loader;
mod span;

pub use element::{Descendants, Element};
pub use span::Span;

use error::{Diagnostic, ParseError};

/// Parse a document into its root [`Element`].
///
/// # Errors
///
/// Returns a [`ParseError`] if `source` is not well-formed markup: syntax
/// errors, mismatched or unclosed tags, malformed attributes, a missing
/// root element, or more than one root element.
pub fn load(source: &str) -> Result<Element, ParseError> {
    loader::load(source).map(|(root, _)| root)
}

/// Parse a document, also returning the warnings raised while loading.
///
/// Warnings never fail a load; text outside the root element is the
/// typical cause.
///
/// # Errors
///
/// Fails exactly when [`load`] fails.
pub fn load_with_warnings(source: &str) -> Result<(Element, Vec<Diagnostic>), ParseError> {
    loader::load(source)
}
