//! CLI module for Tally
//!
//! Provides commands:
//! - `track`: price and record one API call
//! - `list` / `stats` / `daily`: query recorded usage
//! - `prune`: bulk-delete records
//! - `price`: show how a provider/model pair resolves

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tally_core::UsageQuery;
use tally_store::{SqliteUsageStore, UsageLedger};

use crate::config::AppConfig;

pub mod price;
pub mod prune;
pub mod report;
pub mod track;

/// Tally LLM usage ledger CLI
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Track LLM API usage and cost")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price and record one API call
    Track {
        /// Provider name (e.g. openai)
        provider: String,
        /// Model name (e.g. gpt-4o-2024-08-06)
        model: String,
        /// Prompt tokens
        #[arg(allow_negative_numbers = true)]
        prompt_tokens: i64,
        /// Completion tokens
        #[arg(allow_negative_numbers = true)]
        completion_tokens: i64,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recorded calls, newest first
    List(FilterArgs),
    /// Totals with per-provider and per-model breakdowns
    Stats(FilterArgs),
    /// Totals per UTC day
    Daily(FilterArgs),
    /// Delete recorded calls
    Prune {
        /// Only this provider
        #[arg(long)]
        provider: Option<String>,
        /// Only records strictly before this date/time
        #[arg(long, value_parser = parse_start)]
        before: Option<DateTime<Utc>>,
        /// Allow deleting every record when no filter is given
        #[arg(long)]
        all: bool,
    },
    /// Show price resolution and cost for a provider/model pair
    Price {
        /// Provider name
        provider: String,
        /// Model name
        model: String,
        /// Prompt tokens to cost
        #[arg(long, default_value_t = 0)]
        prompt_tokens: u64,
        /// Completion tokens to cost
        #[arg(long, default_value_t = 0)]
        completion_tokens: u64,
    },
}

/// Filters shared by the query commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this provider (exact match)
    #[arg(long)]
    pub provider: Option<String>,
    /// From this date or RFC 3339 time (inclusive)
    #[arg(long, value_parser = parse_start)]
    pub since: Option<DateTime<Utc>>,
    /// Up to this date or RFC 3339 time (inclusive; a date covers the whole day)
    #[arg(long, value_parser = parse_end)]
    pub until: Option<DateTime<Utc>>,
    /// Maximum number of records
    #[arg(long)]
    pub limit: Option<usize>,
}

impl FilterArgs {
    /// Convert to a store query
    pub fn to_query(&self) -> UsageQuery {
        UsageQuery {
            provider: self.provider.clone(),
            start: self.since,
            end: self.until,
            limit: self.limit,
        }
    }
}

/// Run the CLI command
pub async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    let config = crate::loader::load_config(cli.config.as_deref())?;

    match command {
        Commands::Track {
            provider,
            model,
            prompt_tokens,
            completion_tokens,
            notes,
        } => {
            let ledger = open_ledger(&config).await?;
            track::run(
                &ledger,
                provider,
                model,
                prompt_tokens,
                completion_tokens,
                notes,
            )
            .await
        }
        Commands::List(filters) => {
            let ledger = open_ledger(&config).await?;
            let mut query = filters.to_query();
            query.limit = query.limit.or(Some(config.list_limit));
            report::list(&ledger, &query).await
        }
        Commands::Stats(filters) => {
            let ledger = open_ledger(&config).await?;
            report::stats(&ledger, &filters.to_query()).await
        }
        Commands::Daily(filters) => {
            let ledger = open_ledger(&config).await?;
            report::daily(&ledger, &filters.to_query()).await
        }
        Commands::Prune {
            provider,
            before,
            all,
        } => {
            let ledger = open_ledger(&config).await?;
            prune::run(&ledger, provider, before, all).await
        }
        Commands::Price {
            provider,
            model,
            prompt_tokens,
            completion_tokens,
        } => {
            let pricing = config.price_table()?;
            price::run(&pricing, &provider, &model, prompt_tokens, completion_tokens)
        }
    }
}

async fn open_ledger(config: &AppConfig) -> Result<UsageLedger> {
    let pricing = config.price_table()?;
    let db_path = config.db_path();
    let store = SqliteUsageStore::from_path(&db_path)
        .await
        .with_context(|| format!("Failed to open usage database at {}", db_path.display()))?;
    Ok(UsageLedger::new(Arc::new(pricing), Arc::new(store)))
}

// ── helpers ──────────────────────────────────────────────────────────────

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date_or_time(value: &str, day_time: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(day_time).and_utc())
        .map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{value}'"))
}

/// Parse a lower bound: a bare date means the start of that UTC day.
fn parse_start(value: &str) -> Result<DateTime<Utc>, String> {
    let midnight =
        NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(|| "invalid start-of-day time".to_string())?;
    parse_date_or_time(value, midnight)
}

/// Parse an upper bound: a bare date means the end of that UTC day.
fn parse_end(value: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| "invalid end-of-day time".to_string())?;
    parse_date_or_time(value, end_of_day)
}
