//! Parse trading commands from the command line or stdin and print JSON lines.
//!
//! Usage: trade-parse [--config overlay.json] [utterance...]
//! With no utterance, each stdin line is parsed.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use trade_intent::{format, CommandParser, ParserConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.iter().position(|a| a == "--config") {
        Some(idx) => {
            let path = args
                .get(idx + 1)
                .cloned()
                .context("--config needs a path")?;
            args.drain(idx..=idx + 1);
            ParserConfig::from_file(&path).with_context(|| format!("loading {path}"))?
        }
        None => ParserConfig::default(),
    };

    let parser = CommandParser::new(config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "trade-parse ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.is_empty() {
        emit(&parser, &args.join(" "), &mut out)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        emit(&parser, &line, &mut out)?;
    }
    Ok(())
}

fn emit(parser: &CommandParser, text: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let command = parser.parse(text);
    let report = parser.validate(&command);
    let line = json!({
        "summary": format(&command),
        "command": command,
        "validation": report,
    });
    writeln!(out, "{line}")?;
    Ok(())
}
