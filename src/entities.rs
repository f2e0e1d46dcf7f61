//! Auxiliary entity extraction: fee tier, position id, percentage,
//! range strategy and the out-of-range filter
//!
//! Each extractor is an independent scan over normalized text.

use regex::Regex;

use crate::aliases::FeeTierTable;
use crate::types::{FeeTier, RangeType};

pub struct EntityExtractor {
    percent: Regex,
    position: Regex,
    bare_position: Regex,
    all_or_half: Regex,
    range_patterns: Vec<(Regex, RangeType)>,
    out_of_range: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        // Compile regex patterns once - these should never fail
        let range_patterns = vec![
            (Regex::new(r"\bfull[-\s]?range\b").expect("Invalid regex pattern"), RangeType::Full),
            (
                Regex::new(r"\b(concentrated|tight[-\s]?range)\b").expect("Invalid regex pattern"),
                RangeType::Concentrated,
            ),
            (Regex::new(r"\bcustom[-\s]?range\b").expect("Invalid regex pattern"), RangeType::Custom),
        ];

        Self {
            percent: Regex::new(r"\b(\d+(?:\.\d+)?)\s*%").expect("Invalid regex pattern"),
            position: Regex::new(r"\b(?:position|lp|nft)\s*#?\s*(\d+)\b").expect("Invalid regex pattern"),
            bare_position: Regex::new(r"#(\d+)\b").expect("Invalid regex pattern"),
            all_or_half: Regex::new(r"\b(all|half)\b").expect("Invalid regex pattern"),
            range_patterns,
            out_of_range: Regex::new(r"\bout[-\s]*of[-\s]*range\b").expect("Invalid regex pattern"),
        }
    }

    /// First percentage literal that names a known fee tier
    pub fn fee_tier(&self, text: &str, tiers: &FeeTierTable) -> Option<FeeTier> {
        self.percent
            .find_iter(text)
            .find_map(|m| tiers.lookup(m.as_str()))
    }

    /// Position id from `position #12`, `lp 7`, `nft#3`, or a bare `#12`
    pub fn position_id(&self, text: &str) -> Option<String> {
        let keyed = self.position.captures_iter(text).find_map(|cap| {
            let whole = cap.get(0)?;
            // "lp 50%" is a percentage, not an id
            if text[whole.end()..].trim_start().starts_with('%') {
                return None;
            }
            cap.get(1).map(|id| id.as_str().to_string())
        });

        keyed.or_else(|| {
            self.bare_position
                .captures(text)
                .and_then(|cap| cap.get(1))
                .map(|id| id.as_str().to_string())
        })
    }

    /// Explicit `NN%`, else the words "all" (100) or "half" (50)
    pub fn percentage(&self, text: &str) -> Option<u8> {
        let explicit = self.percent.captures_iter(text).find_map(|cap| {
            cap.get(1)
                .and_then(|n| n.as_str().parse::<u8>().ok())
                .filter(|pct| *pct <= 100)
        });
        if explicit.is_some() {
            return explicit;
        }

        self.all_or_half.captures(text).map(|cap| match &cap[1] {
            "half" => 50,
            _ => 100,
        })
    }

    pub fn range_type(&self, text: &str) -> Option<RangeType> {
        self.range_patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, range)| *range)
    }

    pub fn out_of_range(&self, text: &str) -> bool {
        self.out_of_range.is_match(text)
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}
