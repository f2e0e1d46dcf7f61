//! End-to-end behavior of the default parser

use trade_intent::{format, parse, validate, Intent};

#[test]
fn suffix_amount_is_scaled() {
    let cmd = parse("Swap 1.5k PLS for DAI");
    assert_eq!(cmd.intent, Intent::Swap);
    assert_eq!(cmd.amount.as_deref(), Some("1500"));
    assert_eq!(cmd.from_token.as_deref(), Some("PLS"));
    assert_eq!(cmd.to_token.as_deref(), Some("DAI"));
}

#[test]
fn comma_grouped_amount_is_joined() {
    let cmd = parse("Exchange 1,000 USDC to HEX");
    assert_eq!(cmd.intent, Intent::Swap);
    assert_eq!(cmd.amount.as_deref(), Some("1000"));
    assert_eq!(cmd.from_token.as_deref(), Some("USDC"));
    assert_eq!(cmd.to_token.as_deref(), Some("HEX"));
}

#[test]
fn buy_with_pays_with_second_token() {
    let cmd = parse("Buy 1000 HEX with USDC");
    assert_eq!(cmd.from_token.as_deref(), Some("USDC"));
    assert_eq!(cmd.to_token.as_deref(), Some("HEX"));
    assert_eq!(cmd.amount.as_deref(), Some("1000"));
}

#[test]
fn directional_swap_is_confident() {
    let cmd = parse("Swap 100 USDC for WPLS");
    assert_eq!(cmd.intent, Intent::Swap);
    assert_eq!(cmd.from_token.as_deref(), Some("USDC"));
    assert_eq!(cmd.to_token.as_deref(), Some("WPLS"));
    assert_eq!(cmd.amount.as_deref(), Some("100"));
    assert!(cmd.confidence > 0.8);
    assert!(validate(&cmd).is_valid);
    assert_eq!(format(&cmd), "Swap 100 USDC for WPLS");
}

#[test]
fn price_question_skips_interrogative() {
    let cmd = parse("What's the price of HEX?");
    assert_eq!(cmd.intent, Intent::Price);
    assert_eq!(cmd.from_token.as_deref(), Some("HEX"));
}

#[test]
fn gibberish_is_unknown() {
    let cmd = parse("asdkjfh qwer");
    assert_eq!(cmd.intent, Intent::Unknown);
    assert_eq!(cmd.confidence, 0.1);
    assert_eq!(cmd.from_token, None);
    assert_eq!(cmd.to_token, None);
    assert_eq!(cmd.amount, None);
    assert!(!validate(&cmd).is_valid);
}

#[test]
fn alias_resolves_to_canonical_symbol() {
    assert_eq!(parse("price of pulse").from_token.as_deref(), Some("PLS"));
    assert_eq!(
        parse("What is the price of Ethereum today").from_token.as_deref(),
        Some("WETH")
    );
}

#[test]
fn removal_extracts_position_and_percentage() {
    let cmd = parse("Withdraw 50% from position #123");
    assert_eq!(cmd.intent, Intent::RemoveLiquidity);
    assert_eq!(cmd.position_id.as_deref(), Some("123"));
    assert_eq!(cmd.percentage, Some(50));
    assert!(validate(&cmd).is_valid);
    assert_eq!(format(&cmd), "Remove 50% liquidity from position #123");
}

#[test]
fn balance_questions() {
    let cmd = parse("Check my HEX balance");
    assert_eq!(cmd.intent, Intent::Balance);
    assert_eq!(cmd.from_token.as_deref(), Some("HEX"));

    let cmd = parse("How much PLS do I have");
    assert_eq!(cmd.intent, Intent::Balance);
    assert_eq!(cmd.from_token.as_deref(), Some("PLS"));
}

#[test]
fn add_liquidity_with_fee_tier() {
    let cmd = parse("add liquidity 500 PLS and HEX with 1% fee, concentrated");
    assert_eq!(cmd.intent, Intent::AddLiquidity);
    assert_eq!(cmd.fee_tier.map(|t| t.code()), Some(10000));
    assert_eq!(cmd.amount.as_deref(), Some("500"));
    assert!(validate(&cmd).is_valid);
}

#[test]
fn incomplete_swap_fails_validation() {
    let cmd = parse("swap some pls");
    assert_eq!(cmd.intent, Intent::Swap);
    let report = validate(&cmd);
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn command_serializes_camel_case() {
    let json = serde_json::to_value(parse("Withdraw 50% from position #123")).unwrap();
    assert_eq!(json["intent"], "removeLiquidity");
    assert_eq!(json["positionId"], "123");
    assert_eq!(json["percentage"], 50);
    assert_eq!(json["rawInput"], "Withdraw 50% from position #123");
}

#[test]
fn suffix_on_comma_grouped_amount_keeps_every_digit() {
    let cmd = parse("Swap 1,500k PLS for DAI");
    assert_eq!(cmd.amount.as_deref(), Some("1500000"));
    assert_eq!(format(&cmd), "Swap 1500000 PLS for DAI");
}

#[test]
fn fee_percentage_is_not_the_amount() {
    let cmd = parse("Add liquidity 0.25% fee 1000 PLS and DAI");
    assert_eq!(cmd.intent, Intent::AddLiquidity);
    assert_eq!(cmd.amount.as_deref(), Some("1000"));
    assert_eq!(cmd.fee_tier.map(|t| t.code()), Some(2500));
    assert_eq!(cmd.from_token.as_deref(), Some("PLS"));
    assert_eq!(cmd.to_token.as_deref(), Some("DAI"));
}

#[test]
fn sentence_initial_filler_is_not_a_token() {
    let cmd = parse("Let's swap 100 PLS for DAI");
    assert_eq!(cmd.from_token.as_deref(), Some("PLS"));
    assert_eq!(cmd.to_token.as_deref(), Some("DAI"));
    assert!(validate(&cmd).is_valid);
}

#[test]
fn structural_phrasing_raises_confidence() {
    assert_eq!(parse("What's the price of HEX?").confidence, 0.9);
    assert_eq!(parse("Withdraw 50% from position #123").confidence, 1.0);
}
