//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Load configuration from files and environment
///
/// Later sources win: embedded defaults, `config/local`, the explicit
/// `--config` file, then `TALLY_*` environment variables.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Local overrides (optional)
        .add_source(File::with_name("config/local").required(false));

    // 3. Explicit config file (must exist)
    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    // 4. Environment variables (highest priority), e.g. TALLY_PRICING__OVERRIDES
    let config = builder
        .add_source(
            Environment::with_prefix("TALLY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
