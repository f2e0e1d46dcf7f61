//! Command parser - normalize, classify, assemble
//!
//! `CommandParser` owns its configuration and every compiled pattern, so one
//! instance can be shared across threads and called concurrently.

use once_cell::sync::Lazy;

use crate::assemble::{Assembler, AssemblyInput};
use crate::config::ParserConfig;
use crate::matcher::classify;
use crate::tokens::TokenExtractor;
use crate::types::{ParseExplanation, StructuredCommand, ValidationReport};
use crate::validate;

/// Lowercase, trim, and collapse whitespace runs to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub struct CommandParser {
    config: ParserConfig,
    tokens: TokenExtractor,
    assembler: Assembler,
}

impl CommandParser {
    pub fn new(config: ParserConfig) -> Self {
        let tokens = TokenExtractor::new(&config.aliases, &config.ignored_words);
        Self {
            config,
            tokens,
            assembler: Assembler::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse free text into a structured command. Never fails.
    pub fn parse(&self, raw: &str) -> StructuredCommand {
        self.explain(raw).command
    }

    /// Parse and report how the result was reached.
    pub fn explain(&self, raw: &str) -> ParseExplanation {
        let normalized = normalize(raw);
        let classification = classify(&normalized, &self.config.rules);
        let mentions = if classification.is_unknown() {
            Vec::new()
        } else {
            self.tokens.extract(raw, &self.config.aliases)
        };

        let input = AssemblyInput {
            raw,
            normalized: &normalized,
            classification: &classification,
            mentions: &mentions,
        };
        let command = self.assembler.assemble(&input, &self.config);

        tracing::debug!(
            intent = %command.intent,
            score = classification.score,
            structural = classification.structural,
            confidence = command.confidence,
            "parsed command"
        );

        ParseExplanation {
            command,
            normalized,
            scores: classification.scores,
            mentions,
        }
    }

    pub fn validate(&self, command: &StructuredCommand) -> ValidationReport {
        validate::validate(command)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

static DEFAULT_PARSER: Lazy<CommandParser> = Lazy::new(CommandParser::default);

/// Parse with the built-in configuration
pub fn parse(raw: &str) -> StructuredCommand {
    DEFAULT_PARSER.parse(raw)
}

/// Explain a parse with the built-in configuration
pub fn explain(raw: &str) -> ParseExplanation {
    DEFAULT_PARSER.explain(raw)
}
