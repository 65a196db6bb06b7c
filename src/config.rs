//! Application configuration types

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_core::PriceTable;
use tally_store::default_data_dir;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the database (defaults to `~/.tally`)
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Database file name inside `data_dir`
    #[serde(default = "default_database")]
    pub database: String,
    /// Records shown by `list` when no limit is given
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Price table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// TOML price table merged over the built-in prices
    #[serde(default)]
    pub overrides: Option<String>,
}

fn default_database() -> String {
    "usage.db".to_string()
}

fn default_list_limit() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database: default_database(),
            list_limit: default_list_limit(),
            pricing: PricingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }

    /// Resolved database path
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join(&self.database)
    }

    /// Built-in prices with the configured overrides merged on top
    pub fn price_table(&self) -> Result<PriceTable> {
        let mut table = PriceTable::builtin();
        if let Some(path) = &self.pricing.overrides {
            let overrides = PriceTable::from_path(Path::new(path))
                .with_context(|| format!("Failed to load price overrides from {path}"))?;
            info!(path = %path, models = overrides.len(), "Merged price overrides");
            table.merge(overrides);
        }
        Ok(table)
    }
}
