use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flexiwealth_core::loans::emi::{self, EmiInput};

use super::required;
use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Leave the yearly amortization schedule out of the output
    #[arg(long)]
    pub no_schedule: bool,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EmiInput {
            loan_amount: args.loan_amount.ok_or_else(|| required("loan-amount"))?,
            annual_rate: args.rate.ok_or_else(|| required("rate"))?,
            tenure_years: args.tenure_years.ok_or_else(|| required("tenure-years"))?,
        },
    };
    let mut result = emi::calculate_emi(&emi_input)?;
    if args.no_schedule {
        result.result.schedule.clear();
    }
    Ok(serde_json::to_value(result)?)
}
