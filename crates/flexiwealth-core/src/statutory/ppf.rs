use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::accumulate_yearly;
use crate::error::CalcError;
use crate::time_value::{periodic_rate, require_horizon, require_non_negative};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, SeriesPoint};
use crate::CalcResult;

/// Statutory ceiling on PPF deposits per financial year.
pub const PPF_ANNUAL_CEILING: Money = dec!(150000);
/// Currently notified PPF interest rate, in percent.
pub const PPF_DEFAULT_RATE: Percent = dec!(7.1);
/// Lock-in period of a PPF account.
pub const PPF_MIN_TENURE_YEARS: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    pub annual_investment: Money,
    pub years: u32,
    /// Overrides the notified rate when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfOutput {
    /// Deposit actually credited each year, after the ceiling.
    pub effective_annual_investment: Money,
    pub interest_rate: Percent,
    pub total_invested: Money,
    pub total_interest: Money,
    pub maturity_value: Money,
    pub breakdown: Breakdown,
    pub yearly_balances: Vec<SeriesPoint>,
}

/// Yearly PPF accumulation; deposits above the ceiling are clamped, not rejected.
pub fn calculate_ppf(input: &PpfInput) -> CalcResult<ComputationOutput<PpfOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("annual_investment", input.annual_investment)?;
    if input.years < PPF_MIN_TENURE_YEARS {
        return Err(CalcError::invalid(
            "years",
            format!("PPF tenure must be at least {PPF_MIN_TENURE_YEARS} years"),
        ));
    }
    require_horizon("years", input.years)?;
    let interest_rate = input.interest_rate.unwrap_or(PPF_DEFAULT_RATE);
    require_non_negative("interest_rate", interest_rate)?;

    let deposit = input.annual_investment.min(PPF_ANNUAL_CEILING);
    if deposit < input.annual_investment {
        warnings.push(format!(
            "Annual deposit of {} exceeds the PPF ceiling; {} used instead",
            input.annual_investment, PPF_ANNUAL_CEILING
        ));
    }

    let acc = accumulate_yearly(input.years, 1, periodic_rate(interest_rate, 1), |_| {
        Ok(deposit)
    })?;

    let total_invested = deposit * Decimal::from(input.years);
    let total_interest = acc.closing_balance - total_invested;

    let output = PpfOutput {
        effective_annual_investment: deposit,
        interest_rate,
        total_invested,
        total_interest,
        maturity_value: acc.closing_balance,
        breakdown: Breakdown::new(vec![
            ("Total Investment", total_invested),
            ("Total Interest", total_interest),
        ]),
        yearly_balances: acc.balances,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "PPF yearly accumulation (deposit, then compound)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
