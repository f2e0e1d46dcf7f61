//! Amount extraction
//!
//! Picks one decimal amount out of normalized text and returns it as a string.
//! Forms are tried in a fixed order and the first that matches wins:
//! suffixed (`1.5k`), comma-grouped (`1,000.50`), then plain numbers,
//! disambiguated by proximity to an action verb or quantity word.

use regex::Regex;

pub struct AmountExtractor {
    suffixed: Regex,
    grouped: Regex,
    plain: Regex,
    action_verb: Regex,
    quantity_word: Regex,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            // no lookbehind in `regex`, so the literal must start at a non-number boundary
            suffixed: Regex::new(
                r"(?i)(?:^|[^\w.,])(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)([kmb])\b",
            )
            .expect("Invalid regex pattern"),
            grouped: Regex::new(r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b").expect("Invalid regex pattern"),
            plain: Regex::new(r"\b\d+(?:\.\d+)?\b").expect("Invalid regex pattern"),
            action_verb: Regex::new(
                r"\b(swap|exchange|trade|convert|buy|sell|purchase|add|provide)\b",
            )
            .expect("Invalid regex pattern"),
            quantity_word: Regex::new(r"\b(amount|quantity|value)\b").expect("Invalid regex pattern"),
        }
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        if let Some(cap) = self.suffixed.captures(text) {
            let zeros = match cap[2].to_ascii_lowercase().as_str() {
                "k" => 3,
                "m" => 6,
                _ => 9,
            };
            return Some(scale_decimal(&cap[1].replace(',', ""), zeros));
        }

        if let Some(m) = self.grouped.find(text) {
            return Some(m.as_str().replace(',', ""));
        }

        let numbers: Vec<(usize, &str)> = self
            .plain
            .find_iter(text)
            .filter(|m| !text[m.end()..].trim_start().starts_with('%'))
            .map(|m| (m.start(), m.as_str()))
            .collect();

        match numbers.as_slice() {
            [] => None,
            [(_, only)] => Some(only.to_string()),
            [(_, first), ..] => {
                let after = |anchor: &Regex| {
                    anchor.find(text).and_then(|a| {
                        numbers
                            .iter()
                            .find(|(start, _)| *start > a.start())
                            .map(|(_, n)| n.to_string())
                    })
                };
                after(&self.action_verb)
                    .or_else(|| after(&self.quantity_word))
                    .or_else(|| Some(first.to_string()))
            }
        }
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiply a decimal literal by 10^`zeros` by shifting its decimal point.
fn scale_decimal(literal: &str, zeros: usize) -> String {
    let (int_part, frac_part) = literal.split_once('.').unwrap_or((literal, ""));
    let mut digits = String::from(int_part);
    if frac_part.len() <= zeros {
        digits.push_str(frac_part);
        digits.extend(std::iter::repeat('0').take(zeros - frac_part.len()));
    } else {
        digits.push_str(&frac_part[..zeros]);
        digits.push('.');
        digits.push_str(frac_part[zeros..].trim_end_matches('0'));
        if digits.ends_with('.') {
            digits.pop();
        }
    }

    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> Option<String> {
        AmountExtractor::new().extract(text)
    }

    #[test]
    fn test_suffix_before_plain() {
        assert_eq!(amount("swap 1.5k pls for dai").as_deref(), Some("1500"));
        assert_eq!(amount("buy 2m hex").as_deref(), Some("2000000"));
        assert_eq!(amount("sell 0.5b pls").as_deref(), Some("500000000"));
    }

    #[test]
    fn test_suffix_on_comma_grouped_literal() {
        assert_eq!(amount("swap 1,500k pls for dai").as_deref(), Some("1500000"));
        assert_eq!(amount("sell 2,000.5m hex").as_deref(), Some("2000500000"));
        assert_eq!(amount("swap x1k pls"), None);
    }

    #[test]
    fn test_comma_grouped() {
        assert_eq!(amount("exchange 1,000 usdc to hex").as_deref(), Some("1000"));
        assert_eq!(amount("swap 12,345.67 dai for pls").as_deref(), Some("12345.67"));
    }

    #[test]
    fn test_number_after_verb_wins() {
        assert_eq!(amount("at 9 tonight buy 250 hex").as_deref(), Some("250"));
    }

    #[test]
    fn test_quantity_word_fallback() {
        assert_eq!(amount("pool 2 amount 75").as_deref(), Some("75"));
    }

    #[test]
    fn test_first_number_fallback() {
        assert_eq!(amount("3 then 4").as_deref(), Some("3"));
        assert_eq!(amount("swap pls 10 dai 20").as_deref(), Some("10"));
    }

    #[test]
    fn test_percentages_are_not_amounts() {
        assert_eq!(
            amount("add liquidity 0.25% fee 1000 pls and dai").as_deref(),
            Some("1000")
        );
        assert_eq!(amount("withdraw 50 % from position"), None);
    }

    #[test]
    fn test_single_and_absent() {
        assert_eq!(amount("swap 0.0001 wbtc for dai").as_deref(), Some("0.0001"));
        assert_eq!(amount("swap pls for dai"), None);
        assert_eq!(amount(""), None);
    }

    #[test]
    fn test_scale_decimal() {
        assert_eq!(scale_decimal("1.5", 3), "1500");
        assert_eq!(scale_decimal("0.5", 3), "500");
        assert_eq!(scale_decimal("0", 3), "0");
        assert_eq!(scale_decimal("1.23456", 3), "1234.56");
        assert_eq!(scale_decimal("1.5000", 3), "1500");
        assert_eq!(scale_decimal("0.0000000001", 9), "0.1");
    }
}
