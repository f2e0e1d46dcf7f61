//! Python bindings for the command parser using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::ParserConfig;
use crate::format::format;
use crate::parser::{parse, CommandParser};
use crate::types::StructuredCommand;

fn command_to_dict<'py>(py: Python<'py>, cmd: &StructuredCommand) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("intent", cmd.intent.as_str())?;
    dict.set_item("fromToken", cmd.from_token.as_deref())?;
    dict.set_item("toToken", cmd.to_token.as_deref())?;
    dict.set_item("amount", cmd.amount.as_deref())?;
    dict.set_item("feeTier", cmd.fee_tier.map(|t| t.code()))?;
    dict.set_item("positionId", cmd.position_id.as_deref())?;
    dict.set_item("percentage", cmd.percentage)?;
    dict.set_item("rangeType", cmd.range_type.map(|r| r.as_str()))?;
    dict.set_item("outOfRange", cmd.out_of_range)?;
    dict.set_item("confidence", cmd.confidence)?;
    dict.set_item("rawInput", &cmd.raw_input)?;
    Ok(dict)
}

/// Parse text with the built-in configuration and return the command as JSON
#[pyfunction]
pub fn py_parse_command(text: &str) -> PyResult<String> {
    serde_json::to_string(&parse(text))
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("Failed to serialize command: {}", e)))
}

/// Python wrapper for the command parser
#[pyclass]
pub struct PyCommandParser {
    parser: CommandParser,
}

#[pymethods]
impl PyCommandParser {
    /// Build a parser, optionally from a JSON configuration overlay
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => ParserConfig::from_json(json)
                .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?,
            None => ParserConfig::default(),
        };
        Ok(Self {
            parser: CommandParser::new(config),
        })
    }

    /// Parse text into a command dict
    fn parse<'py>(&self, text: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        command_to_dict(py, &self.parser.parse(text))
    }

    /// Parse text and validate the result
    fn validate<'py>(&self, text: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let report = self.parser.validate(&self.parser.parse(text));
        let dict = PyDict::new_bound(py);
        dict.set_item("isValid", report.is_valid)?;
        dict.set_item("errors", report.errors)?;
        Ok(dict)
    }

    /// One-line summary of the parsed command
    fn format(&self, text: &str) -> String {
        format(&self.parser.parse(text))
    }

    /// Parse explanation as a JSON string
    fn explain(&self, text: &str) -> PyResult<String> {
        serde_json::to_string(&self.parser.explain(text)).map_err(|e| {
            PyErr::new::<PyValueError, _>(format!("Failed to serialize explanation: {}", e))
        })
    }
}
