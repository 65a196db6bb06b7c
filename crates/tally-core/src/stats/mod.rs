//! Stats - aggregation of usage records
//!
//! Reduces a record sequence into totals plus per-provider and per-model
//! breakdowns. Results are unordered; ranking is left to the caller.

mod aggregate;


pub use aggregate::{aggregate, aggregate_daily, Bucket, Stats};
