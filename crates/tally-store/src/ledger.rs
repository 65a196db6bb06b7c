//! Usage Ledger
//!
//! Ties a price table to a store: prices each event, persists it, and
//! answers list/aggregate queries over what was stored.

use crate::error::Result;
use crate::store::UsageStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tally_core::{
    aggregate, aggregate_daily, Bucket, NewUsage, PriceTable, PricingWarning, PruneFilter, Stats,
    UsageQuery, UsageRecord, VendorUsage,
};
use tracing::{info, instrument};

/// A stored record plus any pricing warning raised while costing it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedUsage {
    /// The persisted record (with ID)
    pub record: UsageRecord,
    /// Set when the price fell back to zero
    pub warning: Option<PricingWarning>,
}

/// Usage ledger over an injected price table and store
#[derive(Clone)]
pub struct UsageLedger {
    pricing: Arc<PriceTable>,
    store: Arc<dyn UsageStore>,
}

impl UsageLedger {
    /// Create a ledger
    #[must_use]
    pub fn new(pricing: Arc<PriceTable>, store: Arc<dyn UsageStore>) -> Self {
        Self { pricing, store }
    }

    /// Backing store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn UsageStore> {
        &self.store
    }

    /// Price and persist a usage event
    #[instrument(skip(self, usage), fields(provider = %usage.provider, model = %usage.model))]
    pub async fn track(&self, usage: NewUsage) -> Result<TrackedUsage> {
        let estimate = self
            .pricing
            .estimate(&usage.provider, &usage.model, usage.tokens);
        let warning = estimate.warning();

        let record = usage.into_record(estimate.cost);
        let id = self.store.insert(&record).await?;

        info!(
            id,
            tokens = record.total_tokens,
            cost = record.cost,
            store = self.store.name(),
            "Tracked usage"
        );

        Ok(TrackedUsage {
            record: record.with_id(id),
            warning,
        })
    }

    /// Normalize a vendor usage payload, then [`track`](Self::track) it
    ///
    /// Negative counts are rejected before anything is priced or stored.
    pub async fn track_vendor(
        &self,
        provider: &str,
        model: &str,
        usage: VendorUsage,
        notes: Option<String>,
    ) -> Result<TrackedUsage> {
        let tokens = usage.tokens()?;
        let mut event = NewUsage::new(provider, model, tokens);
        event.notes = notes;
        self.track(event).await
    }

    /// Records matching the query, newest first
    pub async fn list(&self, query: &UsageQuery) -> Result<Vec<UsageRecord>> {
        self.store.query(query).await
    }

    /// Aggregate statistics over the matching records
    pub async fn stats(&self, query: &UsageQuery) -> Result<Stats> {
        let records = self.store.query(query).await?;
        Ok(aggregate(&records))
    }

    /// Per-day totals over the matching records
    pub async fn daily(&self, query: &UsageQuery) -> Result<BTreeMap<NaiveDate, Bucket>> {
        let records = self.store.query(query).await?;
        Ok(aggregate_daily(&records))
    }

    /// Delete matching records
    #[instrument(skip(self))]
    pub async fn prune(&self, filter: &PruneFilter) -> Result<u64> {
        let deleted = self.store.delete_matching(filter).await?;
        info!(deleted, "Pruned usage records");
        Ok(deleted)
    }
}
