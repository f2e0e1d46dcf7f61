//! Intent classifier - additive weighted scoring over the rule table

use crate::config::IntentRuleSet;
use crate::types::{Intent, IntentScore};

/// Result of scoring normalized text against every intent
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub score: u32,
    /// Whether a structural (weight >= 2) rule of the winning intent fired
    pub structural: bool,
    /// Per-intent scores in declaration order
    pub scores: Vec<IntentScore>,
}

impl Classification {
    pub fn is_unknown(&self) -> bool {
        self.intent == Intent::Unknown
    }
}

/// Score `normalized` against every rule and pick the winner.
///
/// Every matching rule adds its weight. The strictly highest total wins;
/// equal totals go to the intent declared first. A zero maximum is `Unknown`.
pub fn classify(normalized: &str, rules: &IntentRuleSet) -> Classification {
    let mut scores = Vec::new();
    let mut best: Option<(usize, u32)> = None;
    let mut best_structural = false;

    for (intent, group) in rules.groups() {
        let mut score = 0;
        let mut structural = false;
        let mut matched_rules = Vec::new();

        for rule in group {
            if rule.is_match(normalized) {
                tracing::trace!(%intent, rule = %rule.label, weight = rule.weight, "rule matched");
                score += rule.weight;
                structural |= rule.is_structural();
                matched_rules.push(rule.label.clone());
            }
        }

        // strict comparison keeps the first-declared intent on ties
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((scores.len(), score));
            best_structural = structural;
        }

        scores.push(IntentScore {
            intent,
            score,
            matched_rules,
        });
    }

    match best {
        Some((idx, score)) => Classification {
            intent: scores[idx].intent,
            score,
            structural: best_structural,
            scores,
        },
        None => Classification {
            intent: Intent::Unknown,
            score: 0,
            structural: false,
            scores,
        },
    }
}
