//! Parser configuration: alias tables, intent rule table, word lists
//!
//! A `ParserConfig` is built once (from the built-in defaults, optionally
//! overlaid with a JSON document) and handed to `CommandParser::new`.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::aliases::{FeeTierTable, TokenAliasTable};
use crate::error::ConfigError;
use crate::types::Intent;

/// Weight of a single-keyword rule
pub const BROAD: u32 = 1;
/// Weight of a multi-token or structural rule
pub const SPECIFIC: u32 = 2;

/// Built-in classifier rules: (intent, label, pattern, weight).
/// Patterns run against normalized (lowercase, whitespace-collapsed) text.
const BUILTIN_RULES: &[(Intent, &str, &str, u32)] = &[
    // swap
    (Intent::Swap, "swap-verb", r"\b(swap|exchange|trade|convert)\b", BROAD),
    (Intent::Swap, "buy-sell-verb", r"\b(buy|sell|purchase)\b", BROAD),
    (
        Intent::Swap,
        "verb-directional",
        r"\b(swap|exchange|trade|convert|sell)\b.*\b(for|to|into)\b",
        SPECIFIC,
    ),
    (Intent::Swap, "buy-with", r"\b(buy|purchase)\b.*\b(with|using)\b", SPECIFIC),
    (Intent::Swap, "arrow", r"(->|→|=>)", SPECIFIC),
    // price
    (Intent::Price, "price-word", r"\bprices?\b", BROAD),
    (Intent::Price, "worth-word", r"\b(worth|cost|trading at)\b", BROAD),
    (Intent::Price, "price-of", r"\b(price|value) (of|for)\b", SPECIFIC),
    (Intent::Price, "how-much-is", r"\bhow much (is|are|does)\b", SPECIFIC),
    (
        Intent::Price,
        "what-is-price",
        r"\bwhat('s| is) (the )?(current )?price\b",
        SPECIFIC,
    ),
    // balance
    (Intent::Balance, "balance-word", r"\bbalances?\b", BROAD),
    (Intent::Balance, "my-balance", r"\b(my|check|show)( \w+)? balances?\b", SPECIFIC),
    (
        Intent::Balance,
        "how-much-do-i-have",
        r"\bhow (much|many)\b.*\bdo i (have|own|hold)\b",
        SPECIFIC,
    ),
    // portfolio
    (Intent::Portfolio, "portfolio-word", r"\b(portfolio|holdings|assets)\b", BROAD),
    (
        Intent::Portfolio,
        "my-portfolio",
        r"\b(my|show|view)( \w+)? (portfolio|holdings|assets)\b",
        SPECIFIC,
    ),
    (Intent::Portfolio, "all-tokens", r"\ball (my )?tokens\b", SPECIFIC),
    // addLiquidity
    (Intent::AddLiquidity, "liquidity-word", r"\bliquidity\b", BROAD),
    (Intent::AddLiquidity, "provide-verb", r"\b(provide|deposit|supply)\b", BROAD),
    (
        Intent::AddLiquidity,
        "add-liquidity",
        r"\b(add|provide|deposit|supply)\b.*\bliquidity\b",
        SPECIFIC,
    ),
    (
        Intent::AddLiquidity,
        "add-to-pool",
        r"\b(add|provide|deposit|supply)\b.*\b(to|into|in)\b.*\b(pool|lp)\b",
        SPECIFIC,
    ),
    (
        Intent::AddLiquidity,
        "range-strategy",
        r"\b(full range|custom range|tight range|concentrated)\b",
        SPECIFIC,
    ),
    // removeLiquidity
    (Intent::RemoveLiquidity, "remove-verb", r"\b(remove|withdraw)\b", BROAD),
    (
        Intent::RemoveLiquidity,
        "remove-liquidity",
        r"\b(remove|withdraw|pull)\b.*\bliquidity\b",
        SPECIFIC,
    ),
    (
        Intent::RemoveLiquidity,
        "exit-position",
        r"\b(remove|withdraw|close|exit)\b.*\b(position|lp|nft)\b",
        SPECIFIC,
    ),
    // poolQuery
    (Intent::PoolQuery, "pool-word", r"\bpools?\b", BROAD),
    (Intent::PoolQuery, "pool-metric", r"\b(tvl|apr|apy|reserves)\b", BROAD),
    (Intent::PoolQuery, "positions-word", r"\bpositions?\b", BROAD),
    (
        Intent::PoolQuery,
        "show-pools",
        r"\b(show|list|find|get|check|view|my)( \w+)? (pools?|positions?|lps?)\b",
        SPECIFIC,
    ),
    (
        Intent::PoolQuery,
        "pool-info",
        r"\b(pool|pair) (info|stats|details|liquidity|data)\b",
        SPECIFIC,
    ),
    (Intent::PoolQuery, "out-of-range", r"\bout[-\s]*of[-\s]*range\b", SPECIFIC),
    // help
    (Intent::Help, "help-word", r"\bhelp\b", BROAD),
    (Intent::Help, "commands-word", r"\bcommands?\b", BROAD),
    (Intent::Help, "what-can-you-do", r"\bwhat can (you|i) do\b", SPECIFIC),
    (Intent::Help, "how-do-i", r"\bhow (do|can) i\b", SPECIFIC),
    (Intent::Help, "bare-help", r"^/?(help|start|\?)$", SPECIFIC),
];

/// Words price and balance commands never accept as their subject token.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "what", "is", "at", "today", "current", "show", "me", "how", "much", "does", "check",
];

/// Command vocabulary the casing heuristics must not report as tokens.
const DEFAULT_IGNORED_WORDS: &[&str] = &[
    "swap", "exchange", "trade", "convert", "buy", "sell", "purchase", "add", "provide", "deposit",
    "supply", "remove", "withdraw", "pull", "close", "exit", "price", "prices", "balance",
    "balances", "portfolio", "holdings", "assets", "pool", "pools", "position", "positions",
    "liquidity", "help", "commands", "show", "check", "get", "list", "find", "view", "what", "how",
    "when", "where", "why", "who", "which", "my", "me", "the", "please", "can", "could", "you",
    "for", "to", "into", "with", "using", "from", "of", "and", "or", "all", "half", "range",
    "full", "custom", "concentrated", "tight", "fee", "tier", "out", "in", "on", "is", "are",
    "at", "it", "give", "tell", "hey", "hi", "hello", "want", "need", "would", "like", "much",
    "many", "does", "do", "today", "current", "now", "value", "amount", "quantity", "worth",
    "cost", "lp", "nft", "tvl", "apr", "apy", "id", "ok",
];

/// One weighted classifier predicate
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub label: String,
    pub pattern: Regex,
    pub weight: u32,
}

impl IntentRule {
    pub fn new(label: &str, pattern: &str, weight: u32) -> Result<Self, ConfigError> {
        if weight == 0 {
            return Err(ConfigError::InvalidWeight {
                label: label.to_string(),
                weight,
            });
        }
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            label: label.to_string(),
            source,
        })?;
        Ok(Self {
            label: label.to_string(),
            pattern,
            weight,
        })
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.pattern.is_match(normalized)
    }

    /// Rules above single-keyword weight count as structural.
    pub fn is_structural(&self) -> bool {
        self.weight >= SPECIFIC
    }
}

/// Rules grouped per intent, in declaration order.
#[derive(Debug, Clone)]
pub struct IntentRuleSet {
    groups: Vec<(Intent, Vec<IntentRule>)>,
}

impl IntentRuleSet {
    /// An empty rule group for each classifiable intent
    pub fn empty() -> Self {
        Self {
            groups: Intent::CLASSIFIABLE.iter().map(|i| (*i, Vec::new())).collect(),
        }
    }

    pub fn builtin() -> Self {
        let mut set = Self::empty();
        for (intent, label, pattern, weight) in BUILTIN_RULES {
            let rule = IntentRule::new(label, pattern, *weight)
                .expect("built-in intent rule must compile");
            set.push(*intent, rule);
        }
        set
    }

    /// Append a rule after the existing rules of `intent`.
    ///
    /// Rules for `Intent::Unknown` are dropped; that intent is never scored.
    pub fn push(&mut self, intent: Intent, rule: IntentRule) {
        match self.groups.iter_mut().find(|(i, _)| *i == intent) {
            Some((_, rules)) => rules.push(rule),
            None => tracing::warn!(label = %rule.label, "dropping rule for unscored intent {}", intent),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (Intent, &[IntentRule])> {
        self.groups.iter().map(|(i, rules)| (*i, rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, rules)| rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the parser reads; immutable once handed over.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub aliases: TokenAliasTable,
    pub fee_tiers: FeeTierTable,
    pub rules: IntentRuleSet,
    pub stop_words: Vec<String>,
    pub ignored_words: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            aliases: TokenAliasTable::builtin(),
            fee_tiers: FeeTierTable::builtin(),
            rules: IntentRuleSet::builtin(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            ignored_words: DEFAULT_IGNORED_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Extra rule supplied by a config overlay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSpec {
    pub intent: Intent,
    pub pattern: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_weight() -> u32 {
    BROAD
}

/// JSON overlay merged on top of the built-in configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub token_aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl ParserConfig {
    /// Built-in configuration plus a JSON overlay document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overlay: ConfigOverlay = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.apply(overlay)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Merge an overlay. Built-in entries are never removed.
    pub fn apply(&mut self, overlay: ConfigOverlay) -> Result<(), ConfigError> {
        for (alias, symbol) in &overlay.token_aliases {
            self.aliases.insert(alias, symbol)?;
        }

        for word in overlay.stop_words {
            let word = word.trim().to_lowercase();
            if !word.is_empty() && !self.stop_words.contains(&word) {
                self.stop_words.push(word);
            }
        }

        for (n, spec) in overlay.rules.into_iter().enumerate() {
            if spec.intent == Intent::Unknown {
                return Err(ConfigError::Json(serde::de::Error::custom(format!(
                    "rule #{n} targets intent 'unknown', which is never scored"
                ))));
            }
            let label = spec
                .label
                .unwrap_or_else(|| format!("{}-custom-{}", spec.intent, n));
            let rule = IntentRule::new(&label, &spec.pattern, spec.weight)?;
            self.rules.push(spec.intent, rule);
        }

        Ok(())
    }
}
