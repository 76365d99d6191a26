use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flexiwealth_core::statutory::epf::{self, EpfInput};
use flexiwealth_core::statutory::ppf::{self, PpfInput, PPF_MIN_TENURE_YEARS};

use super::required;
use crate::input;

/// Arguments for the EPF corpus projection
#[derive(Args)]
pub struct EpfArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long, default_value_t = 58)]
    pub retirement_age: u32,

    /// Monthly basic salary plus DA
    #[arg(long)]
    pub monthly_basic_salary: Option<Decimal>,

    /// Employee contribution in percent of basic (matched by the employer)
    #[arg(long, default_value = "12")]
    pub contribution_percent: Decimal,

    /// Expected annual salary increase, in percent
    #[arg(long, default_value = "5")]
    pub annual_salary_increase: Decimal,

    /// EPF interest rate, in percent
    #[arg(long, default_value = "8.1")]
    pub interest_rate: Decimal,
}

pub fn run_epf(args: EpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let epf_input: EpfInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EpfInput {
            current_age: args.current_age.ok_or_else(|| required("current-age"))?,
            retirement_age: args.retirement_age,
            monthly_basic_salary: args
                .monthly_basic_salary
                .ok_or_else(|| required("monthly-basic-salary"))?,
            contribution_percent: args.contribution_percent,
            annual_salary_increase: args.annual_salary_increase,
            interest_rate: args.interest_rate,
        },
    };
    let result = epf::calculate_epf(&epf_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the PPF maturity projection
#[derive(Args)]
pub struct PpfArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Yearly deposit; amounts above the statutory ceiling are capped
    #[arg(long)]
    pub annual_investment: Option<Decimal>,

    /// Tenure in years
    #[arg(long, default_value_t = PPF_MIN_TENURE_YEARS)]
    pub years: u32,

    /// Interest rate in percent; defaults to the notified rate
    #[arg(long)]
    pub interest_rate: Option<Decimal>,
}

pub fn run_ppf(args: PpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ppf_input: PpfInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => PpfInput {
            annual_investment: args
                .annual_investment
                .ok_or_else(|| required("annual-investment"))?,
            years: args.years,
            interest_rate: args.interest_rate,
        },
    };
    let result = ppf::calculate_ppf(&ppf_input)?;
    Ok(serde_json::to_value(result)?)
}
