use crate::cli::MatchStrategy;
use crate::search::{FieldWeights, SearchConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub weights: FieldWeights,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub strategy: MatchStrategy,
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,
}

fn default_regex_size_limit() -> usize {
    1 << 20
}
fn default_cache_size() -> usize {
    64
}
fn default_max_query_len() -> usize {
    256
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            regex_size_limit: default_regex_size_limit(),
            cache_size: default_cache_size(),
            max_query_len: default_max_query_len(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub show_scores: bool,
    #[serde(default = "default_show_fields")]
    pub show_fields: bool,
}

fn default_page_size() -> usize {
    10
}
fn default_show_fields() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            show_scores: false,
            show_fields: default_show_fields(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::find_config_path()? {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn find_config_path() -> Result<Option<PathBuf>> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("clsearch/config.toml");
            if xdg_path.exists() {
                return Ok(Some(xdg_path));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".clsearch.toml");
            if home_path.exists() {
                return Ok(Some(home_path));
            }
        }

        let current_path = Path::new(".clsearch.toml");
        if current_path.exists() {
            return Ok(Some(current_path.to_path_buf()));
        }

        Ok(None)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Engine settings derived from the file
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            strategy: self.search.strategy,
            weights: self.weights.clone(),
            regex_size_limit: self.search.regex_size_limit,
            cache_size: self.search.cache_size,
            max_query_len: self.search.max_query_len,
        }
    }
}
