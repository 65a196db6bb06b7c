//! Pricing - per-model prices and provider/model resolution
//!
//! Prices are expressed in currency units per 1M tokens and kept in
//! declaration order, which drives the substring fallback in
//! [`PriceTable::resolve_price`].
//!
//! # Module Structure
//!
//! - `table`: `ModelPrice`, `ProviderPrices` and the ordered `PriceTable`
//! - `defaults`: built-in price table
//! - `file`: TOML price table files
//! - `lookup`: exact/fallback resolution and pricing warnings

mod defaults;
mod file;
mod lookup;
mod table;


pub use lookup::{PriceLookup, PricingWarning};
pub use table::{ModelPrice, PriceTable, ProviderPrices, TOKENS_PER_PRICE_UNIT};
