//! Usage aggregation

use crate::record::UsageRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Request count, tokens and cost for one group of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Number of records
    pub requests: u64,
    /// Sum of total tokens
    pub tokens: u64,
    /// Sum of cost
    pub cost: f64,
}

impl Bucket {
    fn add(&mut self, record: &UsageRecord) {
        self.requests += 1;
        self.tokens = self.tokens.saturating_add(record.total_tokens);
        self.cost += record.cost;
    }
}

/// Aggregated usage statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Total requests
    pub total_requests: u64,
    /// Total tokens
    pub total_tokens: u64,
    /// Total cost (unrounded)
    pub total_cost: f64,
    /// Usage by provider
    pub by_provider: HashMap<String, Bucket>,
    /// Usage by `provider/model`
    pub by_model: HashMap<String, Bucket>,
}

impl Stats {
    /// Fold one record into the totals and breakdowns
    pub fn merge_record(&mut self, record: &UsageRecord) {
        self.total_requests += 1;
        self.total_tokens = self.total_tokens.saturating_add(record.total_tokens);
        self.total_cost += record.cost;

        self.by_provider
            .entry(record.provider.clone())
            .or_default()
            .add(record);
        self.by_model.entry(record.model_key()).or_default().add(record);
    }

    /// Whether no records were aggregated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

impl<'a> Extend<&'a UsageRecord> for Stats {
    fn extend<I: IntoIterator<Item = &'a UsageRecord>>(&mut self, records: I) {
        for record in records {
            self.merge_record(record);
        }
    }
}

/// Aggregate records into [`Stats`] in a single pass
///
/// An empty input yields all-zero totals and empty breakdowns.
pub fn aggregate<'a, I>(records: I) -> Stats
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut stats = Stats::default();
    stats.extend(records);
    stats
}

/// Aggregate records into per-day buckets (UTC calendar days)
pub fn aggregate_daily<'a, I>(records: I) -> BTreeMap<NaiveDate, Bucket>
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut days: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    for record in records {
        days.entry(record.timestamp.date_naive())
            .or_default()
            .add(record);
    }
    days
}
