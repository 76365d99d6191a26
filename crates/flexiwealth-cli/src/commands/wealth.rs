use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use flexiwealth_core::wealth::human_life_value::{self, HlvInput};
use flexiwealth_core::wealth::net_worth::{self, NetWorthEntry, NetWorthInput};

use super::required;
use crate::input;

/// Parse a `LABEL=AMOUNT` flag value.
fn parse_entry(raw: &str) -> Result<NetWorthEntry, String> {
    let (label, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=AMOUNT, got '{raw}'"))?;
    let amount = Decimal::from_str(amount.trim().replace(',', "").as_str())
        .map_err(|e| format!("invalid amount in '{raw}': {e}"))?;
    Ok(NetWorthEntry {
        label: label.trim().to_string(),
        amount,
    })
}

/// Arguments for net worth
#[derive(Args)]
pub struct NetWorthArgs {
    /// Path to JSON/YAML input file with `assets` and `liabilities` lists
    #[arg(long)]
    pub input: Option<String>,

    /// An asset row, e.g. --asset "Savings Account=500000" (repeatable)
    #[arg(long = "asset", value_parser = parse_entry)]
    pub assets: Vec<NetWorthEntry>,

    /// A liability row, e.g. --liability "Home Loan=2500000" (repeatable)
    #[arg(long = "liability", value_parser = parse_entry)]
    pub liabilities: Vec<NetWorthEntry>,
}

pub fn run_net_worth(args: NetWorthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let nw_input: NetWorthInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => NetWorthInput {
            assets: args.assets,
            liabilities: args.liabilities,
        },
    };
    let result = net_worth::calculate_net_worth(&nw_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for human life value
#[derive(Args)]
pub struct HlvArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long, default_value_t = 60)]
    pub retirement_age: u32,

    /// Current annual income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Annual spending on the earner alone
    #[arg(long, default_value = "0")]
    pub personal_expenses: Decimal,

    /// Expected annual income growth, in percent
    #[arg(long, default_value = "6")]
    pub inflation: Decimal,

    /// Expected annual return on the payout, in percent
    #[arg(long, default_value = "8")]
    pub expected_return: Decimal,
}

pub fn run_hlv(args: HlvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let hlv_input: HlvInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => HlvInput {
            current_age: args.current_age.ok_or_else(|| required("current-age"))?,
            retirement_age: args.retirement_age,
            annual_income: args.annual_income.ok_or_else(|| required("annual-income"))?,
            personal_expenses: args.personal_expenses,
            inflation: args.inflation,
            expected_return: args.expected_return,
        },
    };
    let result = human_life_value::calculate_human_life_value(&hlv_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_entry() {
        let entry = parse_entry("Savings Account = 5,00,000").unwrap();
        assert_eq!(entry.label, "Savings Account");
        assert_eq!(entry.amount, dec!(500000));
    }

    #[test]
    fn test_parse_entry_requires_separator() {
        assert!(parse_entry("Savings Account 500000").is_err());
        assert!(parse_entry("Car=lots").is_err());
    }
}
