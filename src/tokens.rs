//! Token extraction - layered scan for token mentions
//!
//! Passes run narrowest first: exact canonical symbols, natural-language
//! aliases, uppercase runs, capitalized words. A later pass never claims
//! text an earlier pass already matched. Mentions come back in the order
//! they appear in the text; assemblers rely on that ordering.

use ahash::AHashSet;
use regex::Regex;

use crate::aliases::TokenAliasTable;
use crate::types::{MentionSource, TokenMention};

pub struct TokenExtractor {
    symbol_pattern: Option<Regex>,
    word_pattern: Option<Regex>,
    uppercase_pattern: Regex,
    capitalized_pattern: Regex,
    ignored: AHashSet<String>,
}

/// Case-insensitive, word-bounded alternation over `words`, longest first.
fn alternation(words: &[&str]) -> Option<Regex> {
    if words.is_empty() {
        return None;
    }
    let mut words: Vec<&str> = words.to_vec();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let body = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    // escaped alternation of plain words always compiles
    Regex::new(&format!(r"(?i)\b(?:{body})\b")).ok()
}

impl TokenExtractor {
    pub fn new(aliases: &TokenAliasTable, ignored_words: &[String]) -> Self {
        Self {
            symbol_pattern: alternation(&aliases.symbols()),
            word_pattern: alternation(&aliases.word_aliases()),
            uppercase_pattern: Regex::new(r"\b[A-Z]{2,10}\b").expect("Invalid regex pattern"),
            capitalized_pattern: Regex::new(r"\b[A-Z][a-z]+\b").expect("Invalid regex pattern"),
            ignored: ignored_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Find every token mention in `text`, canonicalized through `aliases`.
    pub fn extract(&self, text: &str, aliases: &TokenAliasTable) -> Vec<TokenMention> {
        let mut spans: Vec<(usize, usize, MentionSource)> = Vec::new();

        let passes = [
            (self.symbol_pattern.as_ref(), MentionSource::Symbol),
            (self.word_pattern.as_ref(), MentionSource::KnownWord),
            (Some(&self.uppercase_pattern), MentionSource::Uppercase),
            (Some(&self.capitalized_pattern), MentionSource::Capitalized),
        ];

        for (pattern, source) in passes {
            let Some(pattern) = pattern else { continue };
            for m in pattern.find_iter(text) {
                let (start, end) = (m.start(), m.end());
                if spans.iter().any(|(s, e, _)| start < *e && *s < end) {
                    continue;
                }
                let heuristic = matches!(source, MentionSource::Uppercase | MentionSource::Capitalized);
                if heuristic && self.ignored.contains(&m.as_str().to_lowercase()) {
                    continue;
                }
                spans.push((start, end, source));
            }
        }

        spans.sort_by_key(|(start, _, _)| *start);

        spans
            .into_iter()
            .map(|(start, end, source)| {
                let raw = &text[start..end];
                let (symbol, resolved) = aliases.canonicalize(raw);
                tracing::trace!(raw, %symbol, start, resolved, "token mention");
                TokenMention {
                    raw: raw.to_string(),
                    symbol,
                    start,
                    end,
                    source,
                    resolved,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;

    fn extract(text: &str) -> Vec<TokenMention> {
        let config = ParserConfig::default();
        TokenExtractor::new(&config.aliases, &config.ignored_words).extract(text, &config.aliases)
    }

    fn symbols(text: &str) -> Vec<String> {
        extract(text).into_iter().map(|m| m.symbol).collect()
    }

    #[test]
    fn test_order_of_appearance() {
        assert_eq!(symbols("Swap 100 USDC for WPLS"), vec!["USDC", "WPLS"]);
        assert_eq!(symbols("swap wpls for usdc"), vec!["WPLS", "USDC"]);
    }

    #[test]
    fn test_known_words_resolve() {
        let mentions = extract("trade ethereum for pulse chain");
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].symbol, "WETH");
        assert_eq!(mentions[0].source, MentionSource::KnownWord);
        assert_eq!(mentions[1].symbol, "PLS");
        assert_eq!(mentions[1].raw, "pulse chain");
    }

    #[test]
    fn test_command_words_are_not_tokens() {
        assert_eq!(symbols("What's the price of HEX?"), vec!["HEX"]);
        assert_eq!(symbols("Show My Balance"), Vec::<String>::new());
    }

    #[test]
    fn test_unknown_uppercase_passes_through() {
        let mentions = extract("price of ZORB");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].symbol, "ZORB");
        assert_eq!(mentions[0].source, MentionSource::Uppercase);
        assert!(!mentions[0].resolved);
    }

    #[test]
    fn test_no_duplicate_offsets() {
        let mentions = extract("PLS PLSX pls");
        let starts: Vec<usize> = mentions.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 4, 9]);
        assert_eq!(mentions[1].symbol, "PLSX");
    }

    #[test]
    fn test_pair_notation() {
        assert_eq!(symbols("add liquidity to PLS/DAI"), vec!["PLS", "DAI"]);
    }
}
