//! xmigraph - a navigable graph view over XMI-style model documents.
//!
//! Model documents store a strict containment tree, but the model they
//! describe is a graph: entities inherit from meta types through `base`,
//! point at each other through `rel-*` attributes, and gather references
//! in `set-*` and `invrel-*` attributes. This crate decodes those
//! conventions and lets callers walk the graph.
//!
//! # Examples
//!
//! ```
//! use xmigraph::Document;
//!
//! let source = r#"
//!     <root>
//!       <node id="m1" isMeta="true" atr-name="StateA"/>
//!       <node id="i1" relid="b" base="m1" atr-name="s1" rel-next-0="i2"/>
//!       <node id="i2" relid="c"/>
//!     </root>"#;
//!
//! let document = Document::parse(source).expect("Failed to parse");
//! let b = document.node_by_path("/b").expect("b exists");
//!
//! assert_eq!(b.meta_node().unwrap().attribute("name"), Some("StateA"));
//! assert_eq!(b.pointer("next").unwrap().guid(), Some("i2"));
//! assert_eq!(b.path(), "/b");
//! ```

pub mod config;
pub mod report;

mod document;
mod entity;
mod error;
mod record;

pub use document::Document;
pub use entity::Entity;
pub use error::XmiGraphError;
pub use record::Record;

use log::{debug, info};

use config::{AppConfig, ReportFormat};
use report::{Report, TreeView};

/// Builder for loading model documents and rendering reports from them.
///
/// # Examples
///
/// ```rust,no_run
/// use xmigraph::{ReportBuilder, config::AppConfig};
///
/// let source = r#"<root><node id="m1" isMeta="true" atr-name="State"/></root>"#;
///
/// let builder = ReportBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let output = builder.render(&document).expect("Failed to render");
/// println!("{output}");
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`XmiGraphError::Parse`] if the source is not well-formed.
    pub fn parse(&self, source: &str) -> Result<Document, XmiGraphError> {
        info!("Loading document");

        let document =
            Document::parse(source).map_err(|err| XmiGraphError::new_parse_error(err, source))?;

        debug!(nodes = document.len(); "Document loaded successfully");
        Ok(document)
    }

    /// Build the structure summary and, if configured, the meta listing.
    pub fn report(&self, document: &Document) -> Report {
        let report_config = self.config.report();
        Report {
            structure: report::summarize_document(document, report_config.root_name()),
            meta: report_config
                .include_meta()
                .then(|| report::meta_summaries(document)),
        }
    }

    /// Render the report in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`XmiGraphError::Report`] if JSON serialization fails.
    pub fn render(&self, document: &Document) -> Result<String, XmiGraphError> {
        let format = self.config.report().format();
        info!(format:%; "Rendering report");

        let output = match format {
            ReportFormat::Json => serde_json::to_string_pretty(&self.report(document))?,
            ReportFormat::Tree => TreeView(document).to_string(),
        };

        debug!(bytes = output.len(); "Report rendered");
        Ok(output)
    }
}
