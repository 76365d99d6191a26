use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{
    annuity_future_value, checked_add, checked_div, checked_mul, clamp_growth, clamp_warning,
    compound, periodic_rate, periods_in, require_horizon, require_non_negative,
    required_contribution, AnnuityTiming,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

/// Life expectancy assumed when the caller does not supply one.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 85;

fn default_life_expectancy() -> u32 {
    DEFAULT_LIFE_EXPECTANCY
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: u32,
    /// Household expenses per month in today's money.
    pub monthly_expenses: Money,
    /// Savings already set aside for retirement.
    pub existing_corpus: Money,
    pub inflation: Percent,
    pub pre_retirement_return: Percent,
    pub post_retirement_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub years_to_retire: u32,
    pub post_retirement_years: u32,
    pub annual_expense_at_retirement: Money,
    /// `(1 + post) / (1 + inflation) - 1`.
    pub real_return_rate: Rate,
    pub corpus_needed: Money,
    pub existing_corpus_future_value: Money,
    /// `corpus_needed - existing_corpus_future_value`; may be negative.
    pub shortfall: Money,
    pub monthly_sip_required: Money,
    pub total_invested: Money,
    pub projected_corpus: Money,
    pub total_growth: Money,
    pub raw_growth: Money,
    pub breakdown: Breakdown,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Corpus that funds `years` of expenses growing with inflation, discounted at
/// the real rate. Falls back to the undiscounted sum when the real rate is not
/// positive, where the annuity formula is undefined or diverges.
pub fn corpus_for_expenses(
    annual_expense: Money,
    real_rate: Rate,
    years: u32,
) -> CalcResult<(Money, bool)> {
    if real_rate <= Decimal::ZERO {
        let total = checked_mul(annual_expense, Decimal::from(years), "undiscounted expenses")?;
        return Ok((total, true));
    }
    let discount = compound(real_rate, years)?;
    let perpetuity = checked_div(annual_expense, real_rate, "retirement corpus")?;
    let corpus = checked_mul(
        perpetuity,
        Decimal::ONE - Decimal::ONE / discount,
        "retirement corpus",
    )?;
    Ok((corpus, false))
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size the retirement corpus and the monthly SIP that closes the gap left by
/// existing savings.
pub fn plan_retirement(input: &RetirementInput) -> CalcResult<ComputationOutput<RetirementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.retirement_age <= input.current_age {
        return Err(CalcError::invalid(
            "retirement_age",
            "retirement_age must be > current_age",
        ));
    }
    if input.life_expectancy <= input.retirement_age {
        return Err(CalcError::invalid(
            "life_expectancy",
            "life_expectancy must be > retirement_age",
        ));
    }
    require_non_negative("monthly_expenses", input.monthly_expenses)?;
    require_non_negative("existing_corpus", input.existing_corpus)?;
    require_non_negative("inflation", input.inflation)?;
    require_non_negative("pre_retirement_return", input.pre_retirement_return)?;
    require_non_negative("post_retirement_return", input.post_retirement_return)?;

    let years_to_retire = input.retirement_age - input.current_age;
    let post_retirement_years = input.life_expectancy - input.retirement_age;
    require_horizon("retirement_age", years_to_retire)?;
    require_horizon("life_expectancy", post_retirement_years)?;
    let inflation = periodic_rate(input.inflation, 1);

    // Expenses at retirement, in then-current rupees
    let annual_expense_at_retirement = checked_mul(
        checked_mul(input.monthly_expenses, dec!(12), "annual expenses")?,
        compound(inflation, years_to_retire)?,
        "expenses at retirement",
    )?;

    let real_return_rate =
        (Decimal::ONE + periodic_rate(input.post_retirement_return, 1)) / (Decimal::ONE + inflation)
            - Decimal::ONE;
    let (corpus_needed, fallback) =
        corpus_for_expenses(annual_expense_at_retirement, real_return_rate, post_retirement_years)?;
    if fallback {
        warnings.push(
            "Post-retirement return does not beat inflation; corpus is the undiscounted sum of expenses"
                .into(),
        );
    }

    let existing_corpus_future_value = checked_mul(
        input.existing_corpus,
        compound(periodic_rate(input.pre_retirement_return, 1), years_to_retire)?,
        "existing corpus growth",
    )?;
    let shortfall = corpus_needed - existing_corpus_future_value;

    let months = periods_in("retirement_age", years_to_retire, 12)?;
    let i = periodic_rate(input.pre_retirement_return, 12);
    let monthly_sip_required = if shortfall > Decimal::ZERO {
        required_contribution(shortfall, i, months, AnnuityTiming::Ordinary)?
    } else {
        Decimal::ZERO
    };

    let total_invested = checked_add(
        checked_mul(monthly_sip_required, Decimal::from(months), "total invested")?,
        input.existing_corpus,
        "total invested",
    )?;
    let sip_corpus = if monthly_sip_required > Decimal::ZERO {
        annuity_future_value(monthly_sip_required, i, months, AnnuityTiming::Ordinary)?
    } else {
        Decimal::ZERO
    };
    let projected_corpus =
        checked_add(existing_corpus_future_value, sip_corpus, "projected corpus")?;
    let raw_growth = projected_corpus - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = RetirementOutput {
        years_to_retire,
        post_retirement_years,
        annual_expense_at_retirement,
        real_return_rate,
        corpus_needed,
        existing_corpus_future_value,
        shortfall,
        monthly_sip_required,
        total_invested,
        projected_corpus,
        total_growth,
        raw_growth,
        breakdown: Breakdown::new(vec![
            ("Total Investment", total_invested),
            ("Total Growth", total_growth),
        ]),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Real-rate annuity corpus; shortfall funded by monthly SIP (ordinary annuity)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
