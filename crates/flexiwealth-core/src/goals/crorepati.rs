use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{
    checked_mul, clamp_growth, clamp_warning, periodic_rate, periods_in, require_horizon,
    require_non_negative, required_contribution, AnnuityTiming,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

/// Monthly SIP needed to reach a target corpus (one crore by default in the UI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrorepatiInput {
    pub target_amount: Money,
    pub years: u32,
    /// Expected annual return in percent.
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrorepatiOutput {
    pub months: u32,
    pub monthly_rate: Rate,
    pub required_sip: Money,
    pub total_invested: Money,
    pub total_growth: Money,
    pub raw_growth: Money,
    pub breakdown: Breakdown,
}

/// Size the SIP with an ordinary annuity: `M = FV * i / ((1+i)^n - 1)`.
pub fn calculate_crorepati_sip(
    input: &CrorepatiInput,
) -> CalcResult<ComputationOutput<CrorepatiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("target_amount", input.target_amount)?;
    require_non_negative("expected_return", input.expected_return)?;
    require_horizon("years", input.years)?;

    let months = periods_in("years", input.years, 12)?;
    let i = periodic_rate(input.expected_return, 12);
    let required_sip = required_contribution(input.target_amount, i, months, AnnuityTiming::Ordinary)?;

    let total_invested = checked_mul(required_sip, Decimal::from(months), "total invested")?;
    let raw_growth = input.target_amount - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = CrorepatiOutput {
        months,
        monthly_rate: i,
        required_sip,
        total_invested,
        total_growth,
        raw_growth,
        breakdown: Breakdown::new(vec![
            ("Total Investment", total_invested),
            ("Total Growth", total_growth),
        ]),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Required SIP for target corpus (ordinary annuity)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
