//! Intent-specific completeness checks for parsed commands

use crate::types::{Intent, StructuredCommand, ValidationReport};

/// Report whether `command` carries everything its intent needs.
pub fn validate(command: &StructuredCommand) -> ValidationReport {
    let mut errors = Vec::new();

    match command.intent {
        Intent::Swap => {
            require_token(&mut errors, &command.from_token, "Missing source token to swap from");
            require_token(&mut errors, &command.to_token, "Missing destination token to swap to");
            require_amount(&mut errors, &command.amount, "Missing amount to swap");
            if let (Some(from), Some(to)) = (&command.from_token, &command.to_token) {
                if from == to {
                    errors.push(format!("Cannot swap {from} for itself"));
                }
            }
        }
        Intent::Price => {
            require_token(&mut errors, &command.from_token, "Missing token to price");
        }
        Intent::Balance | Intent::Portfolio | Intent::PoolQuery | Intent::Help => {}
        Intent::AddLiquidity => {
            require_token(&mut errors, &command.from_token, "Missing first token of the pair");
            require_token(&mut errors, &command.to_token, "Missing second token of the pair");
            require_amount(&mut errors, &command.amount, "Missing amount of liquidity to add");
        }
        Intent::RemoveLiquidity => {
            let has_pair = command.from_token.is_some() && command.to_token.is_some();
            if command.position_id.is_none() && !has_pair {
                errors.push("Missing position id or token pair to remove liquidity from".to_string());
            }
            if command.percentage == Some(0) {
                errors.push("Percentage to remove must be between 1 and 100".to_string());
            }
        }
        Intent::Unknown => {
            errors.push("Could not understand the command".to_string());
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn require_token(errors: &mut Vec<String>, token: &Option<String>, message: &str) {
    if token.is_none() {
        errors.push(message.to_string());
    }
}

fn require_amount(errors: &mut Vec<String>, amount: &Option<String>, message: &str) {
    match amount {
        None => errors.push(message.to_string()),
        Some(value) if !is_positive_decimal(value) => {
            errors.push(format!("Amount must be a positive number, got '{value}'"));
        }
        Some(_) => {}
    }
}

/// Plain decimal string with at least one non-zero digit
fn is_positive_decimal(value: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    let mut nonzero = false;
    for c in value.chars() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                nonzero |= c != '0';
            }
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit && nonzero
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap(from: Option<&str>, to: Option<&str>, amount: Option<&str>) -> StructuredCommand {
        let mut cmd = StructuredCommand::new(Intent::Swap, "test");
        cmd.from_token = from.map(str::to_string);
        cmd.to_token = to.map(str::to_string);
        cmd.amount = amount.map(str::to_string);
        cmd
    }

    #[test]
    fn test_complete_swap_is_valid() {
        let report = validate(&swap(Some("PLS"), Some("DAI"), Some("1500")));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_swap_reports_each_missing_field() {
        let report = validate(&swap(None, None, None));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_swap_rejects_same_token_and_zero_amount() {
        let report = validate(&swap(Some("PLS"), Some("PLS"), Some("0.000")));
        assert_eq!(
            report.errors,
            vec![
                "Amount must be a positive number, got '0.000'".to_string(),
                "Cannot swap PLS for itself".to_string(),
            ]
        );
    }

    #[test]
    fn test_price_requires_token() {
        let cmd = StructuredCommand::new(Intent::Price, "price");
        assert_eq!(validate(&cmd).errors, vec!["Missing token to price".to_string()]);
    }

    #[test]
    fn test_remove_liquidity_needs_position_or_pair() {
        let mut cmd = StructuredCommand::new(Intent::RemoveLiquidity, "remove");
        assert!(!validate(&cmd).is_valid);

        cmd.position_id = Some("123".to_string());
        assert!(validate(&cmd).is_valid);

        cmd.position_id = None;
        cmd.from_token = Some("PLS".to_string());
        cmd.to_token = Some("DAI".to_string());
        assert!(validate(&cmd).is_valid);

        cmd.percentage = Some(0);
        assert!(!validate(&cmd).is_valid);
    }

    #[test]
    fn test_unknown_is_never_valid() {
        let report = validate(&StructuredCommand::unknown("???"));
        assert!(!report.is_valid);
    }

    #[test]
    fn test_positive_decimal() {
        assert!(is_positive_decimal("1500"));
        assert!(is_positive_decimal("0.5"));
        assert!(!is_positive_decimal("0"));
        assert!(!is_positive_decimal("1.2.3"));
        assert!(!is_positive_decimal("-4"));
        assert!(!is_positive_decimal(""));
    }
}
