//! Vendor Usage Normalization
//!
//! Each vendor reports token usage under different field names. These
//! shapes are normalized into [`TokenCounts`] before any cost is computed.

use crate::error::{Error, Result};
use crate::record::TokenCounts;
use serde::{Deserialize, Serialize};

/// Usage payload as reported by a vendor
///
/// Counts are signed because they come from untyped JSON; conversion
/// rejects negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VendorUsage {
    /// OpenAI-style `usage` object
    #[serde(rename = "openai")]
    OpenAi {
        /// Prompt tokens
        prompt_tokens: i64,
        /// Completion tokens
        completion_tokens: i64,
    },
    /// Anthropic-style `usage` object
    Anthropic {
        /// Input tokens
        input_tokens: i64,
        /// Output tokens
        output_tokens: i64,
    },
    /// Google-style `usageMetadata` object
    Google {
        /// Prompt tokens
        #[serde(alias = "promptTokenCount")]
        prompt_token_count: i64,
        /// Candidate (completion) tokens
        #[serde(alias = "candidatesTokenCount")]
        candidates_token_count: i64,
    },
}

impl VendorUsage {
    /// Provider name the payload shape belongs to
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Anthropic { .. } => "anthropic",
            Self::Google { .. } => "google",
        }
    }

    /// Raw (prompt, completion) counts
    #[must_use]
    pub fn raw_counts(&self) -> (i64, i64) {
        match *self {
            Self::OpenAi {
                prompt_tokens,
                completion_tokens,
            } => (prompt_tokens, completion_tokens),
            Self::Anthropic {
                input_tokens,
                output_tokens,
            } => (input_tokens, output_tokens),
            Self::Google {
                prompt_token_count,
                candidates_token_count,
            } => (prompt_token_count, candidates_token_count),
        }
    }

    /// Normalized token counts
    pub fn tokens(&self) -> Result<TokenCounts> {
        let (prompt, completion) = self.raw_counts();
        TokenCounts::try_new(prompt, completion)
            .map_err(|e| Error::InvalidInput(format!("{} usage: {e}", self.provider())))
    }
}

impl TryFrom<VendorUsage> for TokenCounts {
    type Error = Error;

    fn try_from(usage: VendorUsage) -> Result<Self> {
        usage.tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_vendor_normalizes() {
        let openai = VendorUsage::OpenAi {
            prompt_tokens: 10,
            completion_tokens: 20,
        };
        let anthropic = VendorUsage::Anthropic {
            input_tokens: 30,
            output_tokens: 40,
        };
        let google = VendorUsage::Google {
            prompt_token_count: 50,
            candidates_token_count: 60,
        };

        assert_eq!(openai.tokens().unwrap(), TokenCounts::new(10, 20));
        assert_eq!(anthropic.tokens().unwrap(), TokenCounts::new(30, 40));
        assert_eq!(TokenCounts::try_from(google).unwrap(), TokenCounts::new(50, 60));
        assert_eq!(google.provider(), "google");
    }

    #[test]
    fn test_negative_counts_are_invalid() {
        let usage = VendorUsage::Anthropic {
            input_tokens: -5,
            output_tokens: 1,
        };
        let err = usage.tokens().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("anthropic"));
    }

    #[test]
    fn test_deserialize_tagged_payloads() {
        let usage: VendorUsage = serde_json::from_str(
            r#"{"kind":"openai","prompt_tokens":12,"completion_tokens":3}"#,
        )
        .unwrap();
        assert_eq!(usage.raw_counts(), (12, 3));

        let usage: VendorUsage = serde_json::from_str(
            r#"{"kind":"google","promptTokenCount":7,"candidatesTokenCount":8}"#,
        )
        .unwrap();
        assert_eq!(usage.raw_counts(), (7, 8));
    }
}
