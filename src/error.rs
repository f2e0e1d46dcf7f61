//! Errors raised while building a parser configuration
//!
//! Parsing itself never fails; only loading a configuration overlay can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule '{label}' has an invalid pattern: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{label}' has weight {weight}; weights must be positive")]
    InvalidWeight { label: String, weight: u32 },

    #[error("invalid token alias '{alias}' -> '{symbol}'")]
    InvalidAlias { alias: String, symbol: String },
}
