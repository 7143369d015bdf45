//! Rendering ranked results for the terminal
pub mod formats;

use crate::cli::OutputFormat;
use crate::config::DisplayConfig;
use crate::record::Record;
use crate::search::SearchResult;

pub use formats::*;

/// Trait for output formatters
pub trait OutputFormatterTrait: Send + Sync {
    /// Render a page of results. `total` is the result count before truncation.
    fn format(&self, results: &[SearchResult], query: &str, total: usize) -> String;
    fn format_records(&self, records: &[&Record]) -> String;
    fn format_detail(&self, record: &Record) -> String;
    fn name(&self) -> &str;
}

pub fn formatter_for(format: OutputFormat, display: &DisplayConfig) -> Box<dyn OutputFormatterTrait> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::from_display(display)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
