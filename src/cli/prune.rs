//! CLI command: `tally prune`

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tally_core::PruneFilter;
use tally_store::UsageLedger;

/// Run the prune subcommand.
pub async fn run(
    ledger: &UsageLedger,
    provider: Option<String>,
    before: Option<DateTime<Utc>>,
    all: bool,
) -> Result<()> {
    let filter = PruneFilter { provider, before };
    if filter == PruneFilter::default() && !all {
        bail!("refusing to delete every record; pass --provider, --before or --all");
    }

    let deleted = ledger.prune(&filter).await?;
    super::print_json(&serde_json::json!({ "deleted": deleted }))
}
