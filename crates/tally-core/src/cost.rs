//! Cost Calculation
//!
//! Turns token counts into a cost using the resolved price. Unknown
//! providers and models cost zero; no rounding is applied.

use crate::pricing::{PriceLookup, PriceTable, PricingWarning};
use crate::record::TokenCounts;
use serde::Serialize;

/// Cost together with the price resolution that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    /// Computed cost (currency units)
    pub cost: f64,
    /// How the price was resolved
    pub lookup: PriceLookup,
}

impl CostEstimate {
    /// Pricing warning, if the price was not found
    #[must_use]
    pub fn warning(&self) -> Option<PricingWarning> {
        self.lookup.warning()
    }
}

impl PriceTable {
    /// Estimate the cost of a call, keeping the resolution details
    pub fn estimate(&self, provider: &str, model: &str, tokens: TokenCounts) -> CostEstimate {
        let lookup = self.resolve_price(provider, model);
        let cost = lookup
            .price_or_zero()
            .calculate_cost(tokens.prompt, tokens.completion);
        CostEstimate { cost, lookup }
    }

    /// Compute the cost of a call
    ///
    /// Never fails: a missing price yields `0.0`.
    pub fn compute_cost(
        &self,
        provider: &str,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> f64 {
        self.estimate(
            provider,
            model,
            TokenCounts::new(prompt_tokens, completion_tokens),
        )
        .cost
    }
}
