//! CLI command: `tally track`
//!
//! Prices one API call, stores it, and prints the stored record.

use anyhow::Result;
use tally_core::{NewUsage, TokenCounts};
use tally_store::UsageLedger;
use tracing::warn;

/// Run the track subcommand.
pub async fn run(
    ledger: &UsageLedger,
    provider: String,
    model: String,
    prompt_tokens: i64,
    completion_tokens: i64,
    notes: Option<String>,
) -> Result<()> {
    // Negative counts are rejected here, before anything is priced.
    let tokens = TokenCounts::try_new(prompt_tokens, completion_tokens)?;

    let mut usage = NewUsage::new(provider, model, tokens);
    usage.notes = notes;

    let tracked = ledger.track(usage).await?;
    if let Some(warning) = &tracked.warning {
        warn!("Recorded with zero cost: {warning}");
    }

    super::print_json(&tracked)
}
