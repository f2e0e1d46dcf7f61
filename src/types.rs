//! Core data types for parsed trading commands

use serde::{Deserialize, Serialize};

/// Coarse action category of a user utterance.
///
/// Variants are listed in classifier declaration order; ties between equally
/// scored intents resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Swap,
    Price,
    Balance,
    Portfolio,
    AddLiquidity,
    RemoveLiquidity,
    PoolQuery,
    Help,
    Unknown,
}

impl Intent {
    /// Every classifiable intent, in declaration order. `Unknown` is excluded
    /// because no rule ever scores it.
    pub const CLASSIFIABLE: [Intent; 8] = [
        Intent::Swap,
        Intent::Price,
        Intent::Balance,
        Intent::Portfolio,
        Intent::AddLiquidity,
        Intent::RemoveLiquidity,
        Intent::PoolQuery,
        Intent::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Swap => "swap",
            Intent::Price => "price",
            Intent::Balance => "balance",
            Intent::Portfolio => "portfolio",
            Intent::AddLiquidity => "addLiquidity",
            Intent::RemoveLiquidity => "removeLiquidity",
            Intent::PoolQuery => "poolQuery",
            Intent::Help => "help",
            Intent::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Liquidity pool fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeTier {
    /// 0.25%
    Low,
    /// 1%
    Medium,
    /// 2%
    High,
}

impl FeeTier {
    /// Fee in hundredths of a basis point.
    pub fn code(&self) -> u32 {
        match self {
            FeeTier::Low => 2500,
            FeeTier::Medium => 10000,
            FeeTier::High => 20000,
        }
    }

    pub fn percent_label(&self) -> &'static str {
        match self {
            FeeTier::Low => "0.25%",
            FeeTier::Medium => "1%",
            FeeTier::High => "2%",
        }
    }
}

/// Price-range strategy for a new liquidity position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeType {
    Full,
    Concentrated,
    Custom,
}

impl RangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::Full => "full",
            RangeType::Concentrated => "concentrated",
            RangeType::Custom => "custom",
        }
    }
}

/// The parser's sole output: a best-effort structured trading command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredCommand {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_token: Option<String>,
    /// Decimal amount kept as text so precision is never lost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_tier: Option<FeeTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_type: Option<RangeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_range: Option<bool>,
    pub confidence: f64,
    pub raw_input: String,
}

impl StructuredCommand {
    /// Confidence reported when nothing could be classified.
    pub const UNKNOWN_CONFIDENCE: f64 = 0.1;

    pub fn new(intent: Intent, raw_input: impl Into<String>) -> Self {
        Self {
            intent,
            from_token: None,
            to_token: None,
            amount: None,
            fee_tier: None,
            position_id: None,
            percentage: None,
            range_type: None,
            out_of_range: None,
            confidence: 0.0,
            raw_input: raw_input.into(),
        }
    }

    pub fn unknown(raw_input: impl Into<String>) -> Self {
        Self {
            confidence: Self::UNKNOWN_CONFIDENCE,
            ..Self::new(Intent::Unknown, raw_input)
        }
    }
}

/// Where in the token extractor's layered scan a mention was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MentionSource {
    /// Exact canonical symbol, e.g. `PLS`
    Symbol,
    /// Natural-language alias, e.g. `pulse`
    KnownWord,
    /// Run of 2-10 uppercase letters
    Uppercase,
    /// Capitalized word
    Capitalized,
}

/// A token mention found in the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMention {
    pub raw: String,
    pub symbol: String,
    pub start: usize,
    pub end: usize,
    pub source: MentionSource,
    /// Whether the alias table (exactly or fuzzily) produced `symbol`
    pub resolved: bool,
}

/// Outcome of checking a command for intent-specific completeness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Score of one intent after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentScore {
    pub intent: Intent,
    pub score: u32,
    pub matched_rules: Vec<String>,
}

/// A parsed command together with how the parser arrived at it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseExplanation {
    pub command: StructuredCommand,
    pub normalized: String,
    pub scores: Vec<IntentScore>,
    pub mentions: Vec<TokenMention>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_camel_case() {
        let json = serde_json::to_string(&Intent::AddLiquidity).unwrap();
        assert_eq!(json, "\"addLiquidity\"");
        let back: Intent = serde_json::from_str("\"removeLiquidity\"").unwrap();
        assert_eq!(back, Intent::RemoveLiquidity);
    }

    #[test]
    fn test_command_omits_absent_fields() {
        let cmd = StructuredCommand::unknown("hello");
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["intent"], "unknown");
        assert_eq!(json["rawInput"], "hello");
        assert!(json.get("fromToken").is_none());
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_fee_tier_codes() {
        assert_eq!(FeeTier::Low.code(), 2500);
        assert_eq!(FeeTier::Medium.code(), 10000);
        assert_eq!(FeeTier::High.code(), 20000);
    }
}
