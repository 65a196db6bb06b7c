//! Query and prune filters over usage records
//!
//! Every filter field is optional and fields are AND-combined. Stores
//! translate these into their own query language; [`UsageQuery::apply`]
//! is the reference in-process implementation.

use crate::record::UsageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter for listing usage records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageQuery {
    /// Exact provider match
    pub provider: Option<String>,
    /// Inclusive lower bound on timestamp
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on timestamp
    pub end: Option<DateTime<Utc>>,
    /// Maximum results, applied after ordering newest first
    pub limit: Option<usize>,
}

impl UsageQuery {
    /// Query matching every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider filter
    #[must_use]
    pub fn for_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Only records at or after `start`
    #[must_use]
    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Only records at or before `end`
    #[must_use]
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Limit the number of results
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes the provider and time filters
    #[must_use]
    pub fn matches(&self, record: &UsageRecord) -> bool {
        self.provider
            .as_deref()
            .is_none_or(|provider| record.provider == provider)
            && self.start.is_none_or(|start| record.timestamp >= start)
            && self.end.is_none_or(|end| record.timestamp <= end)
    }

    /// Filter, order newest first, then truncate to the limit
    #[must_use]
    pub fn apply<I>(&self, records: I) -> Vec<UsageRecord>
    where
        I: IntoIterator<Item = UsageRecord>,
    {
        let mut matched: Vec<_> = records.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Filter for bulk deletion of usage records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneFilter {
    /// Exact provider match
    pub provider: Option<String>,
    /// Exclusive upper bound on timestamp
    pub before: Option<DateTime<Utc>>,
}

impl PruneFilter {
    /// Filter matching every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider filter
    #[must_use]
    pub fn for_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Only records strictly before `before`
    #[must_use]
    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    /// Whether a record would be deleted
    #[must_use]
    pub fn matches(&self, record: &UsageRecord) -> bool {
        self.provider
            .as_deref()
            .is_none_or(|provider| record.provider == provider)
            && self.before.is_none_or(|before| record.timestamp < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NewUsage, TokenCounts};
    use chrono::{Duration, TimeZone};

    fn record(id: i64, provider: &str, hours: i64) -> UsageRecord {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        NewUsage::new(provider, "m", TokenCounts::new(1, 1))
            .at(base + Duration::hours(hours))
            .into_record(0.0)
            .with_id(id)
    }

    #[test]
    fn test_query_builder() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = UsageQuery::new()
            .for_provider("openai")
            .since(start)
            .with_limit(5);

        assert_eq!(query.provider.as_deref(), Some("openai"));
        assert_eq!(query.start, Some(start));
        assert_eq!(query.end, None);
        assert_eq!(query.limit, Some(5));
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        let records = vec![record(1, "openai", 0), record(2, "openai", 1), record(3, "openai", 2)];
        let query = UsageQuery::new()
            .since(records[0].timestamp)
            .until(records[1].timestamp);

        let ids: Vec<_> = query.apply(records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_apply_orders_newest_first_then_limits() {
        let records = vec![
            record(1, "openai", 0),
            record(2, "anthropic", 5),
            record(3, "openai", 3),
            record(4, "openai", 9),
        ];

        let ids: Vec<_> = UsageQuery::new()
            .for_provider("openai")
            .with_limit(2)
            .apply(records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![Some(4), Some(3)]);
    }

    #[test]
    fn test_provider_match_is_exact() {
        let query = UsageQuery::new().for_provider("openai");
        assert!(!query.matches(&record(1, "OpenAI", 0)));
        assert!(query.matches(&record(1, "openai", 0)));
    }

    #[test]
    fn test_prune_before_is_exclusive() {
        let at = record(1, "openai", 4);
        let filter = PruneFilter::new().before(at.timestamp);
        assert!(!filter.matches(&at));
        assert!(filter.matches(&record(2, "openai", 3)));
        assert!(PruneFilter::new().matches(&at));
        assert!(!PruneFilter::new().for_provider("google").matches(&at));
    }
}
