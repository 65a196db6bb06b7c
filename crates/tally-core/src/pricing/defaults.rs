//! Built-in Prices
//!
//! Default price table (per 1M tokens, USD). Within each provider, more
//! specific keys are declared before keys they contain so that the
//! substring fallback picks the closest entry.

use super::table::{ModelPrice, PriceTable};

// ============================================================================
// OpenAI
// ============================================================================

/// GPT-4o mini prices
pub const GPT4O_MINI: ModelPrice = ModelPrice {
    input: 0.15,
    output: 0.60,
};
/// GPT-4o prices
pub const GPT4O: ModelPrice = ModelPrice {
    input: 5.00,
    output: 15.00,
};
/// GPT-4 Turbo prices
pub const GPT4_TURBO: ModelPrice = ModelPrice {
    input: 10.00,
    output: 30.00,
};
/// GPT-4 prices
pub const GPT4: ModelPrice = ModelPrice {
    input: 30.00,
    output: 60.00,
};
/// GPT-3.5 Turbo prices
pub const GPT35_TURBO: ModelPrice = ModelPrice {
    input: 0.50,
    output: 1.50,
};
/// o1-mini prices
pub const O1_MINI: ModelPrice = ModelPrice {
    input: 3.00,
    output: 12.00,
};
/// o1 prices
pub const O1: ModelPrice = ModelPrice {
    input: 15.00,
    output: 60.00,
};

// ============================================================================
// Anthropic
// ============================================================================

/// Claude 3.5 Sonnet prices
pub const CLAUDE_35_SONNET: ModelPrice = ModelPrice {
    input: 3.00,
    output: 15.00,
};
/// Claude 3.5 Haiku prices
pub const CLAUDE_35_HAIKU: ModelPrice = ModelPrice {
    input: 0.80,
    output: 4.00,
};
/// Claude 3 Opus prices
pub const CLAUDE_3_OPUS: ModelPrice = ModelPrice {
    input: 15.00,
    output: 75.00,
};
/// Claude 3 Sonnet prices
pub const CLAUDE_3_SONNET: ModelPrice = ModelPrice {
    input: 3.00,
    output: 15.00,
};
/// Claude 3 Haiku prices
pub const CLAUDE_3_HAIKU: ModelPrice = ModelPrice {
    input: 0.25,
    output: 1.25,
};

// ============================================================================
// Google
// ============================================================================

/// Gemini 2.0 Flash prices
pub const GEMINI_20_FLASH: ModelPrice = ModelPrice {
    input: 0.10,
    output: 0.40,
};
/// Gemini 1.5 Flash prices
pub const GEMINI_15_FLASH: ModelPrice = ModelPrice {
    input: 0.075,
    output: 0.30,
};
/// Gemini 1.5 Pro prices
pub const GEMINI_15_PRO: ModelPrice = ModelPrice {
    input: 1.25,
    output: 5.00,
};
/// Gemini 1.0 Pro prices
pub const GEMINI_PRO: ModelPrice = ModelPrice {
    input: 0.50,
    output: 1.50,
};

// ============================================================================
// Mistral / DeepSeek
// ============================================================================

/// Mistral Large prices
pub const MISTRAL_LARGE: ModelPrice = ModelPrice {
    input: 2.00,
    output: 6.00,
};
/// Mistral Small prices
pub const MISTRAL_SMALL: ModelPrice = ModelPrice {
    input: 0.20,
    output: 0.60,
};
/// DeepSeek Chat prices
pub const DEEPSEEK_CHAT: ModelPrice = ModelPrice {
    input: 0.14,
    output: 0.28,
};
/// DeepSeek Reasoner prices
pub const DEEPSEEK_REASONER: ModelPrice = ModelPrice {
    input: 0.55,
    output: 2.19,
};

/// Built-in entries in declaration order: (provider, model, price)
const BUILTIN_PRICES: &[(&str, &str, ModelPrice)] = &[
    ("openai", "gpt-4o-mini", GPT4O_MINI),
    ("openai", "gpt-4o", GPT4O),
    ("openai", "gpt-4-turbo", GPT4_TURBO),
    ("openai", "gpt-4", GPT4),
    ("openai", "gpt-3.5-turbo", GPT35_TURBO),
    ("openai", "o1-mini", O1_MINI),
    ("openai", "o1", O1),
    ("anthropic", "claude-3.5-sonnet", CLAUDE_35_SONNET),
    ("anthropic", "claude-3-5-sonnet", CLAUDE_35_SONNET),
    ("anthropic", "claude-3.5-haiku", CLAUDE_35_HAIKU),
    ("anthropic", "claude-3-5-haiku", CLAUDE_35_HAIKU),
    ("anthropic", "claude-3-opus", CLAUDE_3_OPUS),
    ("anthropic", "claude-3-sonnet", CLAUDE_3_SONNET),
    ("anthropic", "claude-3-haiku", CLAUDE_3_HAIKU),
    ("google", "gemini-2.0-flash", GEMINI_20_FLASH),
    ("google", "gemini-1.5-flash", GEMINI_15_FLASH),
    ("google", "gemini-1.5-pro", GEMINI_15_PRO),
    ("google", "gemini-pro", GEMINI_PRO),
    ("mistral", "mistral-large", MISTRAL_LARGE),
    ("mistral", "mistral-small", MISTRAL_SMALL),
    ("deepseek", "deepseek-chat", DEEPSEEK_CHAT),
    ("deepseek", "deepseek-reasoner", DEEPSEEK_REASONER),
];

impl PriceTable {
    /// Table with the built-in prices
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (provider, model, price) in BUILTIN_PRICES {
            table.put(provider, model, *price);
        }
        table
    }
}
