//! Command assemblers - one per intent
//!
//! Each assembler pulls the entities its intent needs and computes a
//! confidence: an intent-specific base plus small bonuses per field found,
//! clamped to [0, 1].

use regex::Regex;

use crate::amounts::AmountExtractor;
use crate::config::ParserConfig;
use crate::entities::EntityExtractor;
use crate::matcher::Classification;
use crate::types::{Intent, MentionSource, StructuredCommand, TokenMention};

/// Bonus for each auxiliary field successfully extracted
const FIELD_BONUS: f64 = 0.1;
/// Bonus when a structural pattern (rather than a fallback) decided the result
const STRUCTURAL_BONUS: f64 = 0.2;

/// Everything an assembler sees for one utterance
pub struct AssemblyInput<'a> {
    pub raw: &'a str,
    pub normalized: &'a str,
    pub classification: &'a Classification,
    pub mentions: &'a [TokenMention],
}

/// How a swap sentence orders its two tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapDirection {
    /// "buy X with Y": Y is paid, X is received
    Buy { explicit: bool },
    /// "sell X for Y"
    SellFor,
    /// "X for Y", "X to Y", "X into Y", "X -> Y"
    Directional,
    /// no directional cue; first mention is the source
    Positional,
}

pub struct Assembler {
    amounts: AmountExtractor,
    entities: EntityExtractor,
    buy_verb: Regex,
    buy_with: Regex,
    buy_directional: Regex,
    sell_for: Regex,
    directional: Regex,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            amounts: AmountExtractor::new(),
            entities: EntityExtractor::new(),
            buy_verb: Regex::new(r"\b(buy|purchase)\b").expect("Invalid regex pattern"),
            buy_with: Regex::new(r"\b(buy|purchase)\b.*\b(with|using)\b").expect("Invalid regex pattern"),
            buy_directional: Regex::new(r"\b(buy|purchase)\b.*\b(for|to|into)\b")
                .expect("Invalid regex pattern"),
            sell_for: Regex::new(r"\bsell\b.*\bfor\b").expect("Invalid regex pattern"),
            directional: Regex::new(r"\b(for|to|into)\b|->|→|=>").expect("Invalid regex pattern"),
        }
    }

    pub fn assemble(&self, input: &AssemblyInput<'_>, config: &ParserConfig) -> StructuredCommand {
        match input.classification.intent {
            Intent::Swap => self.swap(input),
            Intent::Price => self.price(input, config),
            Intent::Balance => self.balance(input, config),
            Intent::Portfolio => self.portfolio(input),
            Intent::AddLiquidity => self.add_liquidity(input, config),
            Intent::RemoveLiquidity => self.remove_liquidity(input),
            Intent::PoolQuery => self.pool_query(input),
            Intent::Help => self.help(input),
            Intent::Unknown => StructuredCommand::unknown(input.raw),
        }
    }

    fn swap_direction(&self, text: &str) -> SwapDirection {
        if self.buy_verb.is_match(text) && !self.buy_directional.is_match(text) {
            SwapDirection::Buy {
                explicit: self.buy_with.is_match(text),
            }
        } else if self.sell_for.is_match(text) {
            SwapDirection::SellFor
        } else if self.directional.is_match(text) {
            SwapDirection::Directional
        } else {
            SwapDirection::Positional
        }
    }

    fn swap(&self, input: &AssemblyInput<'_>) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::Swap, input.raw);
        let ranked = ranked(input.mentions);
        let first = symbol_at(&ranked, 0);
        let second = symbol_at(&ranked, 1);

        let direction = self.swap_direction(input.normalized);
        let (from, to) = match direction {
            SwapDirection::Buy { .. } => (second, first),
            SwapDirection::SellFor | SwapDirection::Directional | SwapDirection::Positional => {
                (first, second)
            }
        };
        cmd.from_token = from;
        cmd.to_token = to;
        cmd.amount = self.amounts.extract(input.normalized);

        let structural = !matches!(
            direction,
            SwapDirection::Positional | SwapDirection::Buy { explicit: false }
        );

        let confidence = 0.5
            + bonus(cmd.from_token.is_some())
            + bonus(cmd.to_token.is_some())
            + bonus(cmd.amount.is_some())
            + if structural { STRUCTURAL_BONUS } else { 0.0 };
        finish(cmd, confidence)
    }

    fn price(&self, input: &AssemblyInput<'_>, config: &ParserConfig) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::Price, input.raw);
        cmd.from_token = subject_token(input.mentions, &config.stop_words);

        let confidence = 0.6 + bonus(cmd.from_token.is_some()) + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn balance(&self, input: &AssemblyInput<'_>, config: &ParserConfig) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::Balance, input.raw);
        cmd.from_token = subject_token(input.mentions, &config.stop_words);

        let confidence = 0.6 + bonus(cmd.from_token.is_some()) + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn portfolio(&self, input: &AssemblyInput<'_>) -> StructuredCommand {
        let cmd = StructuredCommand::new(Intent::Portfolio, input.raw);
        let confidence = 0.7 + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn add_liquidity(&self, input: &AssemblyInput<'_>, config: &ParserConfig) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::AddLiquidity, input.raw);
        let (a, b) = token_pair(input.mentions);
        cmd.from_token = a;
        cmd.to_token = b;
        cmd.amount = self.amounts.extract(input.normalized);
        cmd.fee_tier = self.entities.fee_tier(input.normalized, &config.fee_tiers);
        cmd.range_type = self.entities.range_type(input.normalized);

        let confidence = 0.3
            + bonus(cmd.from_token.is_some())
            + bonus(cmd.to_token.is_some())
            + bonus(cmd.amount.is_some())
            + bonus(cmd.fee_tier.is_some())
            + bonus(cmd.range_type.is_some())
            + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn remove_liquidity(&self, input: &AssemblyInput<'_>) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::RemoveLiquidity, input.raw);
        let (a, b) = token_pair(input.mentions);
        cmd.from_token = a;
        cmd.to_token = b;
        cmd.position_id = self.entities.position_id(input.normalized);
        cmd.percentage = self.entities.percentage(input.normalized);

        let identified =
            cmd.position_id.is_some() || (cmd.from_token.is_some() && cmd.to_token.is_some());
        let confidence = 0.6
            + bonus(identified)
            + bonus(cmd.percentage.is_some())
            + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn pool_query(&self, input: &AssemblyInput<'_>) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::PoolQuery, input.raw);
        let (a, b) = token_pair(input.mentions);
        cmd.from_token = a;
        cmd.to_token = b;
        let out_of_range = self.entities.out_of_range(input.normalized);
        cmd.out_of_range = Some(out_of_range);

        let confidence = 0.5
            + bonus(cmd.from_token.is_some())
            + bonus(cmd.to_token.is_some())
            + bonus(out_of_range)
            + structural_bonus(input);
        finish(cmd, confidence)
    }

    fn help(&self, input: &AssemblyInput<'_>) -> StructuredCommand {
        let cmd = StructuredCommand::new(Intent::Help, input.raw);
        let confidence = 0.7 + structural_bonus(input);
        finish(cmd, confidence)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn bonus(found: bool) -> f64 {
    if found {
        FIELD_BONUS
    } else {
        0.0
    }
}

fn structural_bonus(input: &AssemblyInput<'_>) -> f64 {
    if input.classification.structural {
        STRUCTURAL_BONUS
    } else {
        0.0
    }
}

/// Mentions in selection order: unresolved capitalized words ("Let", "Yo")
/// go after everything else, text order is kept within each group.
fn ranked(mentions: &[TokenMention]) -> Vec<&TokenMention> {
    let (guessed, solid): (Vec<&TokenMention>, Vec<&TokenMention>) = mentions
        .iter()
        .partition(|m| m.source == MentionSource::Capitalized && !m.resolved);
    solid.into_iter().chain(guessed).collect()
}

fn symbol_at(mentions: &[&TokenMention], idx: usize) -> Option<String> {
    mentions.get(idx).map(|m| m.symbol.clone())
}

fn token_pair(mentions: &[TokenMention]) -> (Option<String>, Option<String>) {
    let ranked = ranked(mentions);
    (symbol_at(&ranked, 0), symbol_at(&ranked, 1))
}

/// First ranked mention whose raw text is not a stop word
fn subject_token(mentions: &[TokenMention], stop_words: &[String]) -> Option<String> {
    ranked(mentions)
        .into_iter()
        .find(|m| {
            let raw = m.raw.to_lowercase();
            !stop_words.iter().any(|w| *w == raw)
        })
        .map(|m| m.symbol.clone())
}

/// Clamp to [0, 1] and round to two decimals so sums of bonuses stay exact.
fn finish(mut cmd: StructuredCommand, confidence: f64) -> StructuredCommand {
    cmd.confidence = ((confidence * 100.0).round() / 100.0).clamp(0.0, 1.0);
    cmd
}
