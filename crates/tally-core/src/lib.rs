//! Tally Core - Pricing and Usage Aggregation
//!
//! This crate provides the computational core of Tally:
//! - Pricing: per-model price table and the provider/model resolver
//! - Cost: cost calculation from resolved prices and token counts
//! - Record: usage records and token counts
//! - Usage: normalization of vendor-specific usage payloads
//! - Filter: query and prune filters over usage records
//! - Stats: aggregation of usage records into totals and breakdowns
//!
//! Everything here is synchronous and free of I/O apart from reading
//! price table files on request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cost;
pub mod error;
pub mod filter;
pub mod pricing;
pub mod record;
pub mod stats;
pub mod usage;

pub use cost::CostEstimate;
pub use error::{Error, Result};
pub use filter::{PruneFilter, UsageQuery};
pub use pricing::{ModelPrice, PriceLookup, PriceTable, PricingWarning, ProviderPrices};
pub use record::{NewUsage, TokenCounts, UsageRecord};
pub use stats::{aggregate, aggregate_daily, Bucket, Stats};
pub use usage::VendorUsage;
