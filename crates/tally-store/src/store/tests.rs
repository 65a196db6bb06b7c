//! Tests for store module

use super::helpers::{format_timestamp, parse_timestamp};
use super::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tally_core::{NewUsage, PruneFilter, TokenCounts, UsageQuery, UsageRecord};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

fn record(provider: &str, model: &str, hours: i64, cost: f64) -> UsageRecord {
    NewUsage::new(provider, model, TokenCounts::new(100, 50))
        .at(base_time() + Duration::hours(hours))
        .into_record(cost)
}

async fn seed(store: &dyn UsageStore) -> Vec<i64> {
    let mut ids = Vec::new();
    for r in [
        record("openai", "gpt-4o", 0, 0.5),
        record("anthropic", "claude-3-haiku", 1, 0.25),
        record("openai", "gpt-4o-mini", 2, 0.125),
        record("openai", "gpt-4o", 3, 0.5),
    ] {
        ids.push(store.insert(&r).await.unwrap());
    }
    ids
}

async fn check_query_semantics(store: &dyn UsageStore) {
    let ids = seed(store).await;
    assert_eq!(ids.len(), 4);

    // Newest first
    let all = store.query(&UsageQuery::new()).await.unwrap();
    let hours: Vec<_> = all
        .iter()
        .map(|r| (r.timestamp - base_time()).num_hours())
        .collect();
    assert_eq!(hours, vec![3, 2, 1, 0]);
    assert!(all.iter().all(|r| r.id.is_some()));

    // Provider filter, limit after ordering
    let openai = store
        .query(&UsageQuery::new().for_provider("openai").with_limit(2))
        .await
        .unwrap();
    assert_eq!(openai.len(), 2);
    assert_eq!(openai[0].model, "gpt-4o");
    assert_eq!(openai[1].model, "gpt-4o-mini");

    // Inclusive time range
    let window = store
        .query(
            &UsageQuery::new()
                .since(base_time() + Duration::hours(1))
                .until(base_time() + Duration::hours(2)),
        )
        .await
        .unwrap();
    assert_eq!(window.len(), 2);

    // Unknown provider is an empty result, not an error
    let none = store
        .query(&UsageQuery::new().for_provider("acme"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

async fn check_delete_semantics(store: &dyn UsageStore) {
    seed(store).await;

    // Exclusive upper bound: the record at +1h survives
    let deleted = store
        .delete_matching(&PruneFilter::new().before(base_time() + Duration::hours(1)))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let deleted = store
        .delete_matching(&PruneFilter::new().for_provider("openai"))
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let remaining = store.query(&UsageQuery::new()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].provider, "anthropic");

    let deleted = store.delete_matching(&PruneFilter::new()).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(store.query(&UsageQuery::new()).await.unwrap().is_empty());
}

#[test]
fn test_timestamp_format_sorts_lexically() {
    let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let late = early + Duration::microseconds(1);

    let early_str = format_timestamp(early);
    assert_eq!(early_str, "2024-01-01T00:00:00.000000Z");
    assert!(early_str < format_timestamp(late));
    assert_eq!(parse_timestamp(&early_str).unwrap(), early);
    assert!(parse_timestamp("yesterday").is_err());
}

#[test]
fn test_default_data_dir() {
    let dir = default_data_dir();
    assert!(dir.to_string_lossy().contains("tally"));
    assert!(default_db_path().starts_with(&dir));
}

#[tokio::test]
async fn test_sqlite_query_semantics() {
    let store = SqliteUsageStore::in_memory().await.unwrap();
    assert_eq!(store.name(), "sqlite");
    check_query_semantics(&store).await;
}

#[tokio::test]
async fn test_memory_query_semantics() {
    let store = MemoryUsageStore::new();
    assert_eq!(store.name(), "memory");
    check_query_semantics(&store).await;
}

#[tokio::test]
async fn test_sqlite_delete_semantics() {
    let store = SqliteUsageStore::in_memory().await.unwrap();
    check_delete_semantics(&store).await;
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_memory_delete_semantics() {
    let store = MemoryUsageStore::new();
    check_delete_semantics(&store).await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_sqlite_round_trips_record_fields() {
    let store = SqliteUsageStore::in_memory().await.unwrap();
    let original = NewUsage::new("google", "gemini-1.5-pro", TokenCounts::new(1234, 567))
        .with_notes("nightly eval")
        .at(base_time())
        .into_record(0.004377);

    let id = store.insert(&original).await.unwrap();
    let fetched = store.query(&UsageQuery::new()).await.unwrap();

    assert_eq!(fetched, vec![original.with_id(id)]);
}

#[tokio::test]
async fn test_sqlite_ignores_preset_id() {
    let store = SqliteUsageStore::in_memory().await.unwrap();
    let first = store
        .insert(&record("openai", "gpt-4o", 0, 0.0).with_id(42))
        .await
        .unwrap();
    let second = store
        .insert(&record("openai", "gpt-4o", 1, 0.0).with_id(42))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_sqlite_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("usage.db");

    {
        let store = SqliteUsageStore::from_path(&path).await.unwrap();
        seed(&store).await;
        store.pool().close().await;
    }

    let reopened = SqliteUsageStore::from_path(&path).await.unwrap();
    assert_eq!(reopened.count().await.unwrap(), 4);
}
