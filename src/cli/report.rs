//! CLI commands: `tally list`, `tally stats`, `tally daily`
//!
//! Structured output only; ranking and formatting are left to whatever
//! consumes the JSON.

use anyhow::Result;
use tally_core::UsageQuery;
use tally_store::UsageLedger;

/// Print matching records, newest first.
pub async fn list(ledger: &UsageLedger, query: &UsageQuery) -> Result<()> {
    let records = ledger.list(query).await?;
    super::print_json(&records)
}

/// Print aggregate statistics.
pub async fn stats(ledger: &UsageLedger, query: &UsageQuery) -> Result<()> {
    let stats = ledger.stats(query).await?;
    super::print_json(&stats)
}

/// Print per-day totals.
pub async fn daily(ledger: &UsageLedger, query: &UsageQuery) -> Result<()> {
    let days = ledger.daily(query).await?;
    super::print_json(&days)
}
