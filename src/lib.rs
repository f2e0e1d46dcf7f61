//! Trade intent - deterministic natural-language parser for DEX trading commands
//!
//! Turns free text such as "Swap 1.5k PLS for DAI" into a typed
//! `StructuredCommand` with a confidence score, without calling out to any
//! model or network service.

pub mod types;
pub mod error;
pub mod aliases;
pub mod config;
pub mod matcher;
pub mod tokens;
pub mod amounts;
pub mod entities;
pub mod assemble;
pub mod parser;
pub mod validate;
pub mod format;

pub use types::*;
pub use error::ConfigError;
pub use aliases::{FeeTierTable, TokenAliasTable};
pub use config::{IntentRule, IntentRuleSet, ParserConfig};
pub use parser::{explain, normalize, parse, CommandParser};
pub use validate::validate;
pub use format::format;

// Python bindings
#[cfg(feature = "python")]
pub mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn trade_intent(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyCommandParser>()?;
    m.add_function(wrap_pyfunction!(py_parse_command, m)?)?;
    Ok(())
}
