//! TOML price table files
//!
//! Files use arrays of tables so declaration order survives parsing:
//!
//! ```toml
//! [[providers]]
//! name = "openai"
//!
//! [[providers.models]]
//! name = "gpt-4o"
//! input = 5.0
//! output = 15.0
//! ```

use super::table::{ModelPrice, PriceTable};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PriceFile {
    #[serde(default)]
    providers: Vec<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    name: String,
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
    input: f64,
    output: f64,
}

impl PriceTable {
    /// Parse a price table from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PriceFile =
            toml::from_str(content).map_err(|e| Error::PriceTable(e.to_string()))?;

        let mut table = Self::new();
        for provider in file.providers {
            if provider.name.trim().is_empty() {
                return Err(Error::PriceTable("provider name is empty".to_string()));
            }
            for model in provider.models {
                let price = ModelPrice {
                    input: model.input,
                    output: model.output,
                };
                table.insert(&provider.name, &model.name, price)?;
            }
        }
        Ok(table)
    }

    /// Read and parse a TOML price table file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            models = table.len(),
            "Loaded price table"
        );
        Ok(table)
    }
}
