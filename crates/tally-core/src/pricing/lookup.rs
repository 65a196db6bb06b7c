//! Price Resolution
//!
//! Resolves a (provider, model) pair to a price using an exact match first
//! and then a substring fallback over the provider's models in declaration
//! order. Misses are warnings, never errors: callers fall back to a zero
//! price.

use super::table::{ModelPrice, PriceTable};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of resolving a (provider, model) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum PriceLookup {
    /// The model name matched a key exactly
    Exact {
        /// Matched price
        price: ModelPrice,
    },
    /// A declared key was found inside the model name
    Fallback {
        /// The declared key that matched
        key: String,
        /// Matched price
        price: ModelPrice,
    },
    /// Provider is not in the table
    UnknownProvider {
        /// Normalized provider name
        provider: String,
    },
    /// Provider is known but no key matched the model
    UnknownModel {
        /// Normalized provider name
        provider: String,
        /// Normalized model name
        model: String,
    },
}

impl PriceLookup {
    /// Matched price, if any
    #[must_use]
    pub fn price(&self) -> Option<ModelPrice> {
        match self {
            Self::Exact { price } | Self::Fallback { price, .. } => Some(*price),
            Self::UnknownProvider { .. } | Self::UnknownModel { .. } => None,
        }
    }

    /// Matched price, or [`ModelPrice::ZERO`] on a miss
    #[must_use]
    pub fn price_or_zero(&self) -> ModelPrice {
        self.price().unwrap_or(ModelPrice::ZERO)
    }

    /// Whether a price was found
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.price().is_some()
    }

    /// Warning describing a miss
    #[must_use]
    pub fn warning(&self) -> Option<PricingWarning> {
        match self {
            Self::Exact { .. } | Self::Fallback { .. } => None,
            Self::UnknownProvider { provider } => Some(PricingWarning::UnknownProvider {
                provider: provider.clone(),
            }),
            Self::UnknownModel { provider, model } => Some(PricingWarning::UnknownModel {
                provider: provider.clone(),
                model: model.clone(),
            }),
        }
    }
}

/// Warning-class pricing miss
///
/// Reported alongside a zero price; never returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    /// Provider is not in the price table
    #[error("unknown provider '{provider}', using zero price")]
    UnknownProvider {
        /// Normalized provider name
        provider: String,
    },

    /// No price matched the model
    #[error("unknown model '{model}' for provider '{provider}', using zero price")]
    UnknownModel {
        /// Normalized provider name
        provider: String,
        /// Normalized model name
        model: String,
    },
}

impl PriceTable {
    /// Resolve the price for a provider and model
    ///
    /// Both names are lowercased. Misses are logged at warn level and
    /// returned as [`PriceLookup::UnknownProvider`] or
    /// [`PriceLookup::UnknownModel`].
    pub fn resolve_price(&self, provider: &str, model: &str) -> PriceLookup {
        let lookup = self.lookup(&provider.to_lowercase(), &model.to_lowercase());

        match &lookup {
            PriceLookup::Exact { .. } => {}
            PriceLookup::Fallback { key, .. } => {
                debug!(provider, model, key = %key, "Resolved price by substring fallback");
            }
            PriceLookup::UnknownProvider { .. } | PriceLookup::UnknownModel { .. } => {
                if let Some(warning) = lookup.warning() {
                    warn!(provider, model, "{warning}");
                }
            }
        }

        lookup
    }

    fn lookup(&self, provider: &str, model: &str) -> PriceLookup {
        let Some(prices) = self.provider(provider) else {
            return PriceLookup::UnknownProvider {
                provider: provider.to_string(),
            };
        };

        if let Some(price) = prices.get(model) {
            return PriceLookup::Exact { price };
        }

        match prices.first_contained_in(model) {
            Some((key, price)) => PriceLookup::Fallback {
                key: key.to_string(),
                price,
            },
            None => PriceLookup::UnknownModel {
                provider: provider.to_string(),
                model: model.to_string(),
            },
        }
    }
}
