//! Trait for usage storage backends

use crate::error::Result;
use tally_core::{PruneFilter, UsageQuery, UsageRecord};

/// Trait for usage storage backends
///
/// This trait allows different storage implementations (SQLite, in-memory, etc.)
/// to be used interchangeably.
#[async_trait::async_trait]
pub trait UsageStore: Send + Sync {
    /// Persist a record and return its assigned ID
    ///
    /// Any `id` already set on the record is ignored.
    async fn insert(&self, record: &UsageRecord) -> Result<i64>;

    /// Records matching the query, newest first
    async fn query(&self, query: &UsageQuery) -> Result<Vec<UsageRecord>>;

    /// Delete matching records and return how many were removed
    async fn delete_matching(&self, filter: &PruneFilter) -> Result<u64>;

    /// Get the store name (for logging)
    fn name(&self) -> &str;
}
