use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flexiwealth_core::investment::comparison::{
    self, ComparisonInput, DEFAULT_HORIZON_YEARS,
};
use flexiwealth_core::investment::compounding::{self, CompoundingInput};
use flexiwealth_core::investment::sip::{self, SipInput};

use super::required;
use crate::input;

/// Arguments for SIP future value
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested at the start of every month
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return in percent (e.g. 12.5)
    #[arg(long)]
    pub expected_return: Option<Decimal>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or_else(|| required("monthly-investment"))?,
            years: args.years.ok_or_else(|| required("years"))?,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
        },
    };
    let result = sip::calculate_sip_returns(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for lump-sum compound growth
#[derive(Args)]
pub struct CompoundingArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested today
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding periods per year: 1, 2, 4 or 12
    #[arg(long, default_value_t = 1)]
    pub frequency: u32,
}

pub fn run_compounding(args: CompoundingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ci_input: CompoundingInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CompoundingInput {
            principal: args.principal.ok_or_else(|| required("principal"))?,
            annual_rate: args.rate.ok_or_else(|| required("rate"))?,
            years: args.years.ok_or_else(|| required("years"))?,
            frequency: compounding::frequency_from_periods(args.frequency)?,
        },
    };
    let result = compounding::calculate_compound_growth(&ci_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the asset-class growth comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file; may carry custom asset classes
    #[arg(long)]
    pub input: Option<String>,

    /// Lump sum invested in every asset class
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Horizon in years
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    pub years: u32,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: ComparisonInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ComparisonInput {
            initial_amount: args.amount.ok_or_else(|| required("amount"))?,
            years: args.years,
            asset_classes: comparison::default_asset_classes(),
        },
    };
    let result = comparison::compare_asset_classes(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}
