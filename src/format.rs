//! One-line human-readable command summaries

use std::fmt;

use crate::types::{Intent, StructuredCommand};

const MISSING: &str = "?";

pub fn format(command: &StructuredCommand) -> String {
    command.to_string()
}

fn or_missing(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

impl fmt::Display for StructuredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = or_missing(&self.from_token);
        let to = or_missing(&self.to_token);

        match self.intent {
            Intent::Swap => write!(f, "Swap {} {} for {}", or_missing(&self.amount), from, to),
            Intent::Price => write!(f, "Price of {from}"),
            Intent::Balance => match &self.from_token {
                Some(token) => write!(f, "Balance of {token}"),
                None => f.write_str("Wallet balance"),
            },
            Intent::Portfolio => f.write_str("Portfolio overview"),
            Intent::AddLiquidity => {
                write!(f, "Add liquidity: {} {from}/{to}", or_missing(&self.amount))?;
                if let Some(tier) = &self.fee_tier {
                    write!(f, " at {} fee", tier.percent_label())?;
                }
                if let Some(range) = &self.range_type {
                    write!(f, " ({} range)", range.as_str())?;
                }
                Ok(())
            }
            Intent::RemoveLiquidity => {
                let pct = self.percentage.unwrap_or(100);
                match &self.position_id {
                    Some(id) => write!(f, "Remove {pct}% liquidity from position #{id}"),
                    None => write!(f, "Remove {pct}% liquidity from {from}/{to} pool"),
                }
            }
            Intent::PoolQuery => {
                match (&self.from_token, &self.to_token) {
                    (Some(a), Some(b)) => write!(f, "Pool info for {a}/{b}")?,
                    (Some(a), None) => write!(f, "Pools containing {a}")?,
                    _ => f.write_str("Liquidity positions")?,
                }
                if self.out_of_range == Some(true) {
                    f.write_str(" (out of range only)")?;
                }
                Ok(())
            }
            Intent::Help => f.write_str("Show help"),
            Intent::Unknown => write!(f, "Unrecognized command: \"{}\"", self.raw_input.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeeTier, RangeType};

    #[test]
    fn test_swap_summary() {
        let mut cmd = StructuredCommand::new(Intent::Swap, "swap");
        cmd.from_token = Some("PLS".to_string());
        cmd.to_token = Some("DAI".to_string());
        cmd.amount = Some("1500".to_string());
        assert_eq!(format(&cmd), "Swap 1500 PLS for DAI");

        cmd.amount = None;
        assert_eq!(format(&cmd), "Swap ? PLS for DAI");
    }

    #[test]
    fn test_add_liquidity_summary() {
        let mut cmd = StructuredCommand::new(Intent::AddLiquidity, "add");
        cmd.from_token = Some("PLS".to_string());
        cmd.to_token = Some("DAI".to_string());
        cmd.amount = Some("1000".to_string());
        cmd.fee_tier = Some(FeeTier::Medium);
        cmd.range_type = Some(RangeType::Full);
        assert_eq!(format(&cmd), "Add liquidity: 1000 PLS/DAI at 1% fee (full range)");
    }

    #[test]
    fn test_remove_and_pool_summaries() {
        let mut remove = StructuredCommand::new(Intent::RemoveLiquidity, "withdraw");
        remove.position_id = Some("123".to_string());
        remove.percentage = Some(50);
        assert_eq!(format(&remove), "Remove 50% liquidity from position #123");

        let mut pool = StructuredCommand::new(Intent::PoolQuery, "pools");
        pool.out_of_range = Some(true);
        assert_eq!(format(&pool), "Liquidity positions (out of range only)");
    }

    #[test]
    fn test_unknown_summary() {
        let cmd = StructuredCommand::unknown(" asdkjfh qwer ");
        assert_eq!(format(&cmd), "Unrecognized command: \"asdkjfh qwer\"");
    }
}
