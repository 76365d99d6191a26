use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{growing_annuity_pv, periodic_rate, require_horizon, require_non_negative};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlvInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_income: Money,
    /// Spent on the earner alone; not replaced for the family.
    pub personal_expenses: Money,
    /// Expected income growth, in percent.
    pub inflation: Percent,
    /// Return expected on the insurance payout, in percent.
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlvOutput {
    pub working_years: u32,
    pub net_income_for_family: Money,
    /// Suggested life cover; zero when returns do not exceed inflation.
    pub human_life_value: Money,
}

/// Present value of the family's share of income over the remaining working
/// years, growing with inflation and discounted at the expected return.
pub fn calculate_human_life_value(input: &HlvInput) -> CalcResult<ComputationOutput<HlvOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.retirement_age <= input.current_age {
        return Err(CalcError::invalid(
            "retirement_age",
            "retirement_age must be > current_age",
        ));
    }
    require_non_negative("annual_income", input.annual_income)?;
    require_non_negative("personal_expenses", input.personal_expenses)?;
    require_non_negative("inflation", input.inflation)?;
    require_non_negative("expected_return", input.expected_return)?;
    if input.personal_expenses > input.annual_income {
        return Err(CalcError::invalid(
            "personal_expenses",
            "personal_expenses cannot exceed annual_income",
        ));
    }

    let working_years = input.retirement_age - input.current_age;
    require_horizon("retirement_age", working_years)?;
    let net_income_for_family = input.annual_income - input.personal_expenses;
    let r = periodic_rate(input.expected_return, 1);
    let g = periodic_rate(input.inflation, 1);

    if r <= g {
        warnings.push(
            "Expected return does not exceed inflation; human life value reported as zero".into(),
        );
    }
    let human_life_value = growing_annuity_pv(net_income_for_family, r, g, working_years)?;

    let output = HlvOutput {
        working_years,
        net_income_for_family,
        human_life_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Income replacement: present value of a growing annuity",
        input,
        warnings,
        elapsed,
        output,
    ))
}
