//! Tally Store - Usage Persistence
//!
//! This crate provides persistence for Tally usage records:
//! - Store: `UsageStore` trait with SQLite and in-memory backends
//! - Ledger: prices, records and aggregates usage through a store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ledger;
pub mod store;

pub use error::{Error, Result};
pub use ledger::{TrackedUsage, UsageLedger};
pub use store::{
    default_data_dir, default_db_path, MemoryUsageStore, SqliteUsageStore, UsageStore,
};
