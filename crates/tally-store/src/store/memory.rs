//! MemoryUsageStore - in-process usage storage

use super::traits::UsageStore;
use crate::error::Result;
use std::sync::atomic::{AtomicI64, Ordering};
use tally_core::{PruneFilter, UsageQuery, UsageRecord};
use tokio::sync::RwLock;
use tracing::debug;

/// Usage store keeping records in memory
///
/// Useful for tests and for embedding the ledger without a database.
#[derive(Debug)]
pub struct MemoryUsageStore {
    records: RwLock<Vec<UsageRecord>>,
    next_id: AtomicI64,
}

impl Default for MemoryUsageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUsageStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl UsageStore for MemoryUsageStore {
    async fn insert(&self, record: &UsageRecord) -> Result<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records.write().await.push(record.clone().with_id(id));
        debug!("Inserted usage record {}", id);
        Ok(id)
    }

    async fn query(&self, query: &UsageQuery) -> Result<Vec<UsageRecord>> {
        let records = self.records.read().await;
        Ok(query.apply(records.iter().cloned()))
    }

    async fn delete_matching(&self, filter: &PruneFilter) -> Result<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !filter.matches(r));
        let deleted = (before - records.len()) as u64;
        debug!("Deleted {} usage records", deleted);
        Ok(deleted)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
