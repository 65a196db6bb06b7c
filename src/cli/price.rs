//! CLI command: `tally price`
//!
//! Shows which price entry a provider/model pair resolves to, without
//! touching the database.

use anyhow::Result;
use tally_core::{PriceTable, TokenCounts};

/// Run the price subcommand.
pub fn run(
    pricing: &PriceTable,
    provider: &str,
    model: &str,
    prompt_tokens: u64,
    completion_tokens: u64,
) -> Result<()> {
    let estimate = pricing.estimate(
        provider,
        model,
        TokenCounts::new(prompt_tokens, completion_tokens),
    );
    super::print_json(&estimate)
}
