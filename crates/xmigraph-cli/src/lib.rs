//! CLI logic for the xmigraph model inspector.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use xmigraph::{ReportBuilder, XmiGraphError};

/// Run the xmigraph CLI application
///
/// Loads the input document, renders the configured report and writes it
/// to the output file, or to standard output when none is given.
///
/// # Errors
///
/// Returns `XmiGraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Report rendering errors
pub fn run(args: &Args) -> Result<(), XmiGraphError> {
    info!(input_path = args.input; "Processing document");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_report_format(format);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = ReportBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let output = builder.render(&document)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Report written");
        }
        None => println!("{output}"),
    }

    Ok(())
}
