use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{
    annuity_future_value, checked_mul, clamp_growth, clamp_warning, periodic_rate, periods_in,
    require_horizon, require_non_negative, require_percent_range, AnnuityTiming,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// NPS exit age assumed by the calculator.
pub const DEFAULT_NPS_RETIREMENT_AGE: u32 = 60;
/// Regulatory minimum share of the corpus that must buy an annuity.
pub const MIN_ANNUITY_PERCENT: Decimal = dec!(40);
pub const MAX_ANNUITY_PERCENT: Decimal = dec!(100);

fn default_retirement_age() -> u32 {
    DEFAULT_NPS_RETIREMENT_AGE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsInput {
    pub monthly_investment: Money,
    pub current_age: u32,
    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,
    /// Expected annual return on the NPS portfolio, in percent.
    pub expected_return: Percent,
    /// Share of the corpus used to buy an annuity, in percent (40–100).
    pub annuity_percent: Percent,
    /// Annual rate paid by the annuity, in percent.
    pub annuity_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpsOutput {
    pub months: u32,
    pub total_invested: Money,
    pub total_corpus: Money,
    pub annuity_value: Money,
    pub lumpsum_value: Money,
    pub monthly_pension: Money,
    pub total_growth: Money,
    pub raw_growth: Money,
    /// Annuity vs. lump-sum split of the corpus.
    pub breakdown: Breakdown,
}

/// Accumulate the NPS corpus (annuity-due) and split it into annuity and
/// lump sum at exit.
pub fn calculate_nps(input: &NpsInput) -> CalcResult<ComputationOutput<NpsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.retirement_age <= input.current_age {
        return Err(CalcError::invalid(
            "current_age",
            format!("current_age must be below the exit age of {}", input.retirement_age),
        ));
    }
    require_non_negative("monthly_investment", input.monthly_investment)?;
    require_non_negative("expected_return", input.expected_return)?;
    require_non_negative("annuity_return", input.annuity_return)?;
    require_percent_range(
        "annuity_percent",
        input.annuity_percent,
        MIN_ANNUITY_PERCENT,
        MAX_ANNUITY_PERCENT,
    )?;

    let years = input.retirement_age - input.current_age;
    require_horizon("current_age", years)?;
    let months = periods_in("current_age", years, 12)?;
    let i = periodic_rate(input.expected_return, 12);

    let total_corpus =
        annuity_future_value(input.monthly_investment, i, months, AnnuityTiming::Due)?;
    let total_invested =
        checked_mul(input.monthly_investment, Decimal::from(months), "total invested")?;

    let annuity_value = total_corpus * (input.annuity_percent / dec!(100));
    let lumpsum_value = total_corpus - annuity_value;
    let monthly_pension = checked_mul(
        annuity_value,
        periodic_rate(input.annuity_return, 12),
        "monthly pension",
    )?;

    let raw_growth = total_corpus - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = NpsOutput {
        months,
        total_invested,
        total_corpus,
        annuity_value,
        lumpsum_value,
        monthly_pension,
        total_growth,
        raw_growth,
        breakdown: Breakdown::new(vec![
            ("Annuity", annuity_value),
            ("Lumpsum", lumpsum_value),
        ]),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPS corpus (annuity-due) split into annuity and lump sum",
        input,
        warnings,
        elapsed,
        output,
    ))
}
