//! Integration tests for Tally
//!
//! These tests verify the integration between the crates:
//! - tally-core: price resolution, cost calculation, aggregation
//! - tally-store: persistence and the usage ledger

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tally_core::{
    NewUsage, PriceLookup, PriceTable, PricingWarning, PruneFilter, TokenCounts, UsageQuery,
    VendorUsage,
};
use tally_store::{SqliteUsageStore, UsageLedger};

async fn file_ledger(dir: &tempfile::TempDir) -> UsageLedger {
    let store = SqliteUsageStore::from_path(&dir.path().join("usage.db"))
        .await
        .unwrap();
    UsageLedger::new(Arc::new(PriceTable::builtin()), Arc::new(store))
}

// ============================================================================
// Pricing Integration Tests
// ============================================================================

#[test]
fn test_builtin_table_resolves_dated_models() {
    let table = PriceTable::builtin();

    match table.resolve_price("OpenAI", "gpt-4o-mini-2024-07-18") {
        PriceLookup::Fallback { key, .. } => assert_eq!(key, "gpt-4o-mini"),
        other => panic!("expected fallback, got {other:?}"),
    }

    assert!(matches!(
        table.resolve_price("anthropic", "claude-3.5-sonnet"),
        PriceLookup::Exact { .. }
    ));
}

#[test]
fn test_override_file_replaces_builtin_price() {
    let mut table = PriceTable::builtin();
    let overrides = PriceTable::from_toml_str(
        r#"
        [[providers]]
        name = "openai"

        [[providers.models]]
        name = "gpt-4o"
        input = 2.5
        output = 10.0

        [[providers]]
        name = "local"

        [[providers.models]]
        name = "llama"
        input = 0.0
        output = 0.0
        "#,
    )
    .unwrap();
    table.merge(overrides);

    let cost = table.compute_cost("openai", "gpt-4o", 1_000_000, 1_000_000);
    assert!((cost - 12.5).abs() < 1e-12);

    let local = table.estimate("local", "llama-3-8b", TokenCounts::new(100, 100));
    assert_eq!(local.cost, 0.0);
    assert!(local.warning().is_none());
}

// ============================================================================
// Ledger Integration Tests
// ============================================================================

#[tokio::test]
async fn test_track_list_stats_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = file_ledger(&dir).await;
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    ledger
        .track(
            NewUsage::new("anthropic", "claude-3.5-sonnet", TokenCounts::new(10_000, 5_000))
                .at(start),
        )
        .await
        .unwrap();
    ledger
        .track(
            NewUsage::new("openai", "gpt-4o-2024-08-06", TokenCounts::new(2_500, 1_500))
                .with_notes("dated")
                .at(start + Duration::hours(1)),
        )
        .await
        .unwrap();
    let unknown = ledger
        .track(
            NewUsage::new("acme", "rocket-1", TokenCounts::new(100, 100))
                .at(start + Duration::days(1)),
        )
        .await
        .unwrap();
    assert!(matches!(
        unknown.warning,
        Some(PricingWarning::UnknownProvider { .. })
    ));

    let listed = ledger.list(&UsageQuery::new()).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].provider, "acme");
    assert_eq!(listed[2].provider, "anthropic");

    let stats = ledger.stats(&UsageQuery::new()).await.unwrap();
    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.total_tokens, 19_200);
    assert!((stats.total_cost - 0.14).abs() < 1e-9);
    assert_eq!(stats.by_provider["acme"].cost, 0.0);
    assert_eq!(stats.by_model["openai/gpt-4o-2024-08-06"].requests, 1);

    let first_day = ledger
        .stats(&UsageQuery::new().until(start + Duration::hours(12)))
        .await
        .unwrap();
    assert_eq!(first_day.total_requests, 2);

    let daily = ledger.daily(&UsageQuery::new()).await.unwrap();
    assert_eq!(daily.len(), 2);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ledger = file_ledger(&dir).await;
        ledger
            .track_vendor(
                "anthropic",
                "claude-3-haiku",
                VendorUsage::Anthropic {
                    input_tokens: 4_000,
                    output_tokens: 800,
                },
                None,
            )
            .await
            .unwrap();
    }

    let ledger = file_ledger(&dir).await;
    let records = ledger.list(&UsageQuery::new()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].prompt_tokens, 4_000);
    assert_eq!(ledger.store().name(), "sqlite");
}

#[tokio::test]
async fn test_vendor_payload_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = file_ledger(&dir).await;

    let usage: VendorUsage = serde_json::from_str(
        r#"{"kind": "google", "promptTokenCount": 1000000, "candidatesTokenCount": 0}"#,
    )
    .unwrap();
    let tracked = ledger
        .track_vendor("google", "gemini-1.5-pro-002", usage, None)
        .await
        .unwrap();

    assert!((tracked.record.cost - 1.25).abs() < 1e-12);
}

#[tokio::test]
async fn test_prune_before_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = file_ledger(&dir).await;
    let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    for at in [cutoff - Duration::days(2), cutoff, cutoff + Duration::days(2)] {
        ledger
            .track(NewUsage::new("openai", "gpt-4o", TokenCounts::new(10, 10)).at(at))
            .await
            .unwrap();
    }

    let deleted = ledger
        .prune(&PruneFilter::new().before(cutoff))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = ledger.list(&UsageQuery::new()).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|r| r.timestamp >= cutoff));
}
