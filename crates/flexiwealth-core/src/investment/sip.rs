use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{
    annuity_value_from_factor, checked_mul, clamp_growth, clamp_warning, compound, periodic_rate,
    periods_in, require_horizon, require_non_negative, AnnuityTiming,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, Rate, SeriesPoint};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly SIP projected forward at a fixed expected return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: Money,
    pub years: u32,
    /// Expected annual return in percent (e.g. 12.5).
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub months: u32,
    pub monthly_rate: Rate,
    pub total_invested: Money,
    pub future_value: Money,
    /// `future_value - total_invested`, never below zero.
    pub total_growth: Money,
    /// Signed growth before clamping.
    pub raw_growth: Money,
    pub breakdown: Breakdown,
    /// Corpus at the end of each year.
    pub yearly_values: Vec<SeriesPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a monthly SIP. Contributions are made at the start of each month
/// (annuity-due), so every instalment earns a full month of return.
pub fn calculate_sip_returns(input: &SipInput) -> CalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("monthly_investment", input.monthly_investment)?;
    require_non_negative("expected_return", input.expected_return)?;
    require_horizon("years", input.years)?;

    let months = periods_in("years", input.years, 12)?;
    let i = periodic_rate(input.expected_return, 12);

    // (1+i)^(12*year) is carried forward one year at a time.
    let year_factor = compound(i, 12)?;
    let mut factor = Decimal::ONE;
    let mut yearly_values = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        factor = checked_mul(factor, year_factor, "SIP growth factor")?;
        let value = annuity_value_from_factor(
            input.monthly_investment,
            i,
            year * 12,
            factor,
            AnnuityTiming::Due,
        )?;
        yearly_values.push(SeriesPoint {
            period: year,
            value,
        });
    }

    let future_value = yearly_values
        .last()
        .map(|p| p.value)
        .unwrap_or(Decimal::ZERO);
    let total_invested = checked_mul(
        input.monthly_investment,
        Decimal::from(months),
        "SIP total invested",
    )?;
    let raw_growth = future_value - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = SipOutput {
        months,
        monthly_rate: i,
        total_invested,
        future_value,
        total_growth,
        raw_growth,
        breakdown: Breakdown::new(vec![
            ("Total Investment", total_invested),
            ("Total Growth", total_growth),
        ]),
        yearly_values,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP future value (annuity-due, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
