//! Usage Records
//!
//! This module contains the types describing a single tracked API call.

use crate::error::{Error, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Prompt and completion token counts for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenCounts {
    /// Prompt (input) tokens
    pub prompt: u64,
    /// Completion (output) tokens
    pub completion: u64,
}

impl TokenCounts {
    /// Create token counts
    #[must_use]
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self { prompt, completion }
    }

    /// Create token counts from signed values, rejecting negatives
    pub fn try_new(prompt: i64, completion: i64) -> Result<Self> {
        let prompt = u64::try_from(prompt)
            .map_err(|_| Error::InvalidInput(format!("negative prompt tokens: {prompt}")))?;
        let completion = u64::try_from(completion).map_err(|_| {
            Error::InvalidInput(format!("negative completion tokens: {completion}"))
        })?;
        Ok(Self { prompt, completion })
    }

    /// Prompt plus completion tokens
    #[must_use]
    pub fn total(&self) -> u64 {
        self.prompt.saturating_add(self.completion)
    }
}

/// A usage event to be priced and recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUsage {
    /// Provider name
    pub provider: String,
    /// Model name
    pub model: String,
    /// Token counts
    pub tokens: TokenCounts,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Event time (defaults to now when recorded)
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewUsage {
    /// Create a usage event
    #[must_use]
    pub fn new(provider: impl Into<String>, model: impl Into<String>, tokens: TokenCounts) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            tokens,
            notes: None,
            timestamp: None,
        }
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the event time
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the record with a computed cost
    ///
    /// The timestamp is truncated to microseconds, the precision records
    /// are persisted with.
    #[must_use]
    pub fn into_record(self, cost: f64) -> UsageRecord {
        UsageRecord {
            id: None,
            provider: self.provider,
            model: self.model,
            prompt_tokens: self.tokens.prompt,
            completion_tokens: self.tokens.completion,
            total_tokens: self.tokens.total(),
            cost,
            timestamp: self
                .timestamp
                .unwrap_or_else(Utc::now)
                .trunc_subsecs(6),
            notes: self.notes,
        }
    }
}

/// A recorded usage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Record ID (assigned by the store)
    pub id: Option<i64>,
    /// Provider name
    pub provider: String,
    /// Model name
    pub model: String,
    /// Prompt tokens
    pub prompt_tokens: u64,
    /// Completion tokens
    pub completion_tokens: u64,
    /// Prompt plus completion tokens
    pub total_tokens: u64,
    /// Cost (currency units)
    pub cost: f64,
    /// When the call happened
    pub timestamp: DateTime<Utc>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl UsageRecord {
    /// Token counts of this record
    #[must_use]
    pub fn tokens(&self) -> TokenCounts {
        TokenCounts::new(self.prompt_tokens, self.completion_tokens)
    }

    /// Key used for per-model breakdowns: `provider/model`
    #[must_use]
    pub fn model_key(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }

    /// Copy of this record carrying a store-assigned ID
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
