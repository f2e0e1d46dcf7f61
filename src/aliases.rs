//! Token alias and fee-tier lookup tables
//!
//! Both tables are built once and only read afterwards. Keys are lowercase.

use ahash::AHashMap;

use crate::error::ConfigError;
use crate::types::FeeTier;

/// Built-in PulseChain token vocabulary: (canonical symbol, aliases).
const BUILTIN_TOKENS: &[(&str, &[&str])] = &[
    ("PLS", &["pulse", "pulsechain", "pulse chain"]),
    ("WPLS", &["wrapped pulse"]),
    ("PLSX", &["pulsex"]),
    ("HEX", &[]),
    ("INC", &["incentive"]),
    ("DAI", &[]),
    ("USDC", &["usd coin"]),
    ("USDT", &["tether"]),
    ("WETH", &["eth", "ether", "ethereum", "wrapped ether"]),
    ("WBTC", &["btc", "bitcoin", "wrapped bitcoin"]),
];

/// Lowercase alias to canonical token symbol.
///
/// Every canonical symbol also resolves from its own lowercase form.
#[derive(Debug, Clone, Default)]
pub struct TokenAliasTable {
    index: AHashMap<String, String>,
    // longest alias first, then lexicographic, so fuzzy scans are stable
    ordered: Vec<(String, String)>,
}

impl TokenAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in PulseChain vocabulary
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (symbol, aliases) in BUILTIN_TOKENS {
            for alias in aliases.iter() {
                table.push(alias, symbol);
            }
            table.push(symbol, symbol);
        }
        table.reorder();
        table
    }

    /// Register `alias` for `symbol`, replacing any previous mapping.
    pub fn insert(&mut self, alias: &str, symbol: &str) -> Result<(), ConfigError> {
        let alias_key = alias.trim().to_lowercase();
        let symbol = symbol.trim();
        if alias_key.is_empty() || symbol.is_empty() {
            return Err(ConfigError::InvalidAlias {
                alias: alias.to_string(),
                symbol: symbol.to_string(),
            });
        }
        self.push(&alias_key, symbol);
        self.push(symbol, symbol);
        self.reorder();
        Ok(())
    }

    fn push(&mut self, alias: &str, symbol: &str) {
        self.index.insert(alias.to_lowercase(), symbol.to_string());
    }

    fn reorder(&mut self) {
        let mut ordered: Vec<(String, String)> = self
            .index
            .iter()
            .map(|(a, s)| (a.clone(), s.clone()))
            .collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        self.ordered = ordered;
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact lookup of a lowercase alias
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        self.index.get(alias).map(|s| s.as_str())
    }

    /// Substring containment in either direction, longest alias first.
    ///
    /// Short aliases can match unrelated words here; callers only reach this
    /// after an exact lookup has failed.
    pub fn fuzzy_lookup(&self, word: &str) -> Option<&str> {
        if word.is_empty() {
            return None;
        }
        self.ordered
            .iter()
            .find(|(alias, _)| word.contains(alias.as_str()) || alias.contains(word))
            .map(|(_, symbol)| symbol.as_str())
    }

    /// Resolve a raw mention to a canonical symbol.
    ///
    /// Returns the symbol and whether the table produced it. Unresolved
    /// mentions come back uppercased.
    pub fn canonicalize(&self, raw: &str) -> (String, bool) {
        let lower = raw.trim().to_lowercase();
        if let Some(symbol) = self.lookup(&lower) {
            return (symbol.to_string(), true);
        }
        if let Some(symbol) = self.fuzzy_lookup(&lower) {
            return (symbol.to_string(), true);
        }
        if looks_like_symbol(raw) {
            return (raw.to_uppercase(), false);
        }
        (raw.trim().to_uppercase(), false)
    }

    /// Distinct canonical symbols, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.index.values().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Aliases that differ from their symbol, longest first
    pub fn word_aliases(&self) -> Vec<&str> {
        self.ordered
            .iter()
            .filter(|(alias, symbol)| *alias != symbol.to_lowercase())
            .map(|(alias, _)| alias.as_str())
            .collect()
    }
}

/// 2-10 ASCII uppercase letters, the shape of a bare ticker
pub fn looks_like_symbol(raw: &str) -> bool {
    (2..=10).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_uppercase())
}

/// Fee-percentage literal to fee tier.
#[derive(Debug, Clone)]
pub struct FeeTierTable {
    entries: Vec<(String, FeeTier)>,
}

impl FeeTierTable {
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ("0.25%".to_string(), FeeTier::Low),
                ("1%".to_string(), FeeTier::Medium),
                ("2%".to_string(), FeeTier::High),
            ],
        }
    }

    /// Look up a literal such as `"1%"` or `"0.25 %"`.
    pub fn lookup(&self, literal: &str) -> Option<FeeTier> {
        let compact: String = literal.chars().filter(|c| !c.is_whitespace()).collect();
        self.entries
            .iter()
            .find(|(lit, _)| *lit == compact)
            .map(|(_, tier)| *tier)
    }
}

impl Default for FeeTierTable {
    fn default() -> Self {
        Self::builtin()
    }
}
