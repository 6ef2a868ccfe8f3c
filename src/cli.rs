use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ingest::{JsonLayout, XmlFieldStyle};

/// Verbosity levels for output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
    /// Show all available debugging information
    Debug,
}

impl VerbosityLevel {
    /// Default `tracing` filter directive for this level
    pub fn log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::Debug => "debug",
        }
    }
}

/// Summarise employee records from a JSON or XML file
#[derive(Parser, Debug, Clone)]
#[command(name = "employee-report")]
#[command(about = "Report mean salary, highest-paid employee and the roster sorted by ID")]
#[command(version)]
pub struct Cli {
    /// Input file; the name must contain `.json` or `.xml`
    #[arg(help = "Employee file to report on (.json or .xml)")]
    pub path: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Where the record array sits in JSON input
    #[arg(long = "layout", value_enum)]
    pub layout: Option<JsonLayout>,

    /// Name of the JSON member holding the record array
    #[arg(long = "collection-key")]
    pub collection_key: Option<String>,

    /// Name of the XML root element
    #[arg(long = "xml-root")]
    pub xml_root: Option<String>,

    /// Name of the XML record element
    #[arg(long = "xml-record")]
    pub xml_record: Option<String>,

    /// How XML record elements carry their fields
    #[arg(long = "xml-fields", value_enum)]
    pub xml_fields: Option<XmlFieldStyle>,

    /// Accept negative values and numeric strings; do not fail on an empty result
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Decimal places for amounts
    #[arg(long = "precision")]
    pub precision: Option<usize>,

    /// Currency prefix for amounts
    #[arg(long = "currency")]
    pub currency: Option<String>,

    /// Disable coloured headings
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Prefix error messages with a timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Enable verbose output (repeat for debug output)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Verbosity requested on the command line, if any
    pub fn verbosity(&self) -> Option<VerbosityLevel> {
        if self.quiet {
            Some(VerbosityLevel::Quiet)
        } else {
            match self.verbose {
                0 => None,
                1 => Some(VerbosityLevel::Verbose),
                _ => Some(VerbosityLevel::Debug),
            }
        }
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}
