//! Price table types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of tokens a price applies to
pub const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

/// Input/output price pair for one model (per 1M tokens)
///
/// Deserialization goes through [`ModelPrice::new`], so negative or
/// non-finite prices are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawModelPrice")]
pub struct ModelPrice {
    /// Cost per 1M prompt tokens
    pub input: f64,
    /// Cost per 1M completion tokens
    pub output: f64,
}

impl ModelPrice {
    /// Price pair used when nothing matches
    pub const ZERO: Self = Self {
        input: 0.0,
        output: 0.0,
    };

    /// Create a validated price pair
    ///
    /// Both prices must be finite and non-negative.
    pub fn new(input: f64, output: f64) -> Result<Self> {
        let price = Self { input, output };
        price.check().map_err(Error::PriceTable)?;
        Ok(price)
    }

    fn check(&self) -> std::result::Result<(), String> {
        for (label, value) in [("input", self.input), ("output", self.output)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{label} price must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }

    /// Calculate cost for given token counts
    #[must_use]
    pub fn calculate_cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        let input_cost = (prompt_tokens as f64 / TOKENS_PER_PRICE_UNIT) * self.input;
        let output_cost = (completion_tokens as f64 / TOKENS_PER_PRICE_UNIT) * self.output;
        input_cost + output_cost
    }
}

#[derive(Deserialize)]
struct RawModelPrice {
    input: f64,
    output: f64,
}

impl TryFrom<RawModelPrice> for ModelPrice {
    type Error = Error;

    fn try_from(raw: RawModelPrice) -> Result<Self> {
        Self::new(raw.input, raw.output)
    }
}

/// Prices for every known model of one provider, in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderPrices {
    name: String,
    models: Vec<(String, ModelPrice)>,
}

impl ProviderPrices {
    fn new(name: String) -> Self {
        Self {
            name,
            models: Vec::new(),
        }
    }

    /// Provider name (lowercase)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Models in declaration order
    pub fn models(&self) -> impl Iterator<Item = (&str, ModelPrice)> + '_ {
        self.models.iter().map(|(key, price)| (key.as_str(), *price))
    }

    /// Exact match on an already-lowercased model name
    #[must_use]
    pub fn get(&self, model: &str) -> Option<ModelPrice> {
        self.models
            .iter()
            .find(|(key, _)| key == model)
            .map(|(_, price)| *price)
    }

    /// First declared key contained in `model`
    #[must_use]
    pub fn first_contained_in(&self, model: &str) -> Option<(&str, ModelPrice)> {
        self.models
            .iter()
            .find(|(key, _)| model.contains(key.as_str()))
            .map(|(key, price)| (key.as_str(), *price))
    }

    /// Number of models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the provider declares no models
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    // Existing keys keep their position; new keys go last.
    fn upsert(&mut self, model: String, price: ModelPrice) {
        match self.models.iter_mut().find(|(key, _)| *key == model) {
            Some(entry) => entry.1 = price,
            None => self.models.push((model, price)),
        }
    }
}

/// Ordered provider → model → price mapping
///
/// Provider and model names are stored lowercase. The table is built once
/// and then shared read-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    providers: Vec<ProviderPrices>,
}

impl PriceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a price
    ///
    /// Names are lowercased. Replacing a model keeps its declaration position.
    /// Blank names are rejected: an empty model key would be contained in
    /// every model name and win the substring fallback.
    pub fn insert(&mut self, provider: &str, model: &str, price: ModelPrice) -> Result<()> {
        if provider.trim().is_empty() {
            return Err(Error::PriceTable("provider name is empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(Error::PriceTable(format!(
                "empty model name under provider {provider}"
            )));
        }
        price
            .check()
            .map_err(|msg| Error::PriceTable(format!("{provider}/{model}: {msg}")))?;

        self.put(provider, model, price);
        Ok(())
    }

    // Callers guarantee the entry is valid.
    pub(super) fn put(&mut self, provider: &str, model: &str, price: ModelPrice) {
        let provider = provider.to_lowercase();
        let model = model.to_lowercase();

        let index = match self.providers.iter().position(|p| p.name == provider) {
            Some(index) => index,
            None => {
                self.providers.push(ProviderPrices::new(provider));
                self.providers.len() - 1
            }
        };
        self.providers[index].upsert(model, price);
    }

    /// Builder-style [`insert`](Self::insert) with validation
    pub fn with_price(
        mut self,
        provider: &str,
        model: &str,
        input: f64,
        output: f64,
    ) -> Result<Self> {
        self.insert(provider, model, ModelPrice::new(input, output)?)?;
        Ok(self)
    }

    /// Merge `other` on top of this table
    ///
    /// Prices in `other` replace existing entries in place; unknown providers
    /// and models are appended in `other`'s order.
    pub fn merge(&mut self, other: PriceTable) {
        for provider in other.providers {
            for (model, price) in provider.models {
                self.put(&provider.name, &model, price);
            }
        }
    }

    /// Look up a provider by (lowercase) name
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&ProviderPrices> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Providers in declaration order
    pub fn providers(&self) -> impl Iterator<Item = &ProviderPrices> {
        self.providers.iter()
    }

    /// Total number of priced models
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.iter().map(ProviderPrices::len).sum()
    }

    /// Whether the table holds no prices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

