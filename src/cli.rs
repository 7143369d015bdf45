use crate::record::{Category, Status};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Changelog file (JSON or YAML); the bundled release notes when omitted
    #[clap(long, value_parser)]
    pub records: Option<PathBuf>,

    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    /// Print engine metrics after the command finishes
    #[clap(long, value_parser, default_value_t = false)]
    pub metrics: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank changelog entries against a free-text query
    Search {
        query: String,

        /// Number of results to display (defaults to the configured page size)
        #[clap(short, long, value_parser)]
        limit: Option<usize>,

        /// Display every result
        #[clap(long, value_parser, default_value_t = false, conflicts_with = "limit")]
        all: bool,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[clap(long, value_enum)]
        strategy: Option<MatchStrategy>,

        #[clap(long, value_enum)]
        status: Option<Status>,

        #[clap(long, value_enum)]
        category: Option<Category>,

        /// Show relevance scores
        #[clap(long, value_parser, default_value_t = false)]
        scores: bool,
    },
    /// List every entry in collection order
    List {
        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print one entry in full
    Show { id: String },
    /// Generate shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How a query is matched against field text
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// SIMD substring search
    #[default]
    Literal,
    /// Escaped, size-limited regular expression
    Regex,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Literal => write!(f, "literal"),
            MatchStrategy::Regex => write!(f, "regex"),
        }
    }
}
