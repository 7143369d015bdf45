pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod record;
pub mod search;
pub mod store;

use crate::config::Config;
pub use crate::error::{ClsearchError, Result};
pub use clap::Parser;
pub use cli::{Cli, Commands, MatchStrategy, OutputFormat};
pub use metrics::Metrics;
pub use record::{Category, Change, ChangeKind, Link, Record, Status};
pub use search::{Field, FieldWeights, SearchConfig, SearchEngine, SearchResult, SharedEngine};
pub use store::RecordStore;

/// Load the user's config, falling back to defaults when it is missing or broken
pub fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config file: {e:#}");
            Config::default()
        }
    }
}
