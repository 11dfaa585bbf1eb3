//! Command-line argument definitions.
//!
//! Arguments select the input document, where the report goes, which
//! configuration file to use, and how verbose logging is.

use clap::Parser;

use xmigraph::config::ReportFormat;

/// Command-line arguments for the xmigraph model inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; the report is printed when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format (json, tree); overrides the configuration file
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
