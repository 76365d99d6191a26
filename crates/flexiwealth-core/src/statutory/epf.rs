use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::accumulate_yearly;
use crate::error::CalcError;
use crate::time_value::{checked_mul, periodic_rate, require_horizon, require_non_negative};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, SeriesPoint};
use crate::CalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpfInput {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Monthly basic salary (plus DA) today.
    pub monthly_basic_salary: Money,
    /// Employee contribution in percent of basic; the employer matches it.
    pub contribution_percent: Percent,
    /// Expected yearly salary increase, in percent.
    pub annual_salary_increase: Percent,
    /// EPF interest rate, in percent.
    pub interest_rate: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpfOutput {
    pub working_years: u32,
    pub total_contributed: Money,
    pub total_interest: Money,
    pub total_corpus: Money,
    pub breakdown: Breakdown,
    /// Balance at the end of each year, keyed by age.
    pub yearly_balances: Vec<SeriesPoint>,
}

/// Year-by-year EPF accumulation. Each year the employee and employer
/// contributions are credited first and the whole balance then earns one
/// year of interest; the salary rises before the next year's contribution.
pub fn calculate_epf(input: &EpfInput) -> CalcResult<ComputationOutput<EpfOutput>> {
    let start = Instant::now();

    if input.retirement_age <= input.current_age {
        return Err(CalcError::invalid(
            "retirement_age",
            "retirement_age must be > current_age",
        ));
    }
    require_non_negative("monthly_basic_salary", input.monthly_basic_salary)?;
    require_non_negative("contribution_percent", input.contribution_percent)?;
    require_non_negative("annual_salary_increase", input.annual_salary_increase)?;
    require_non_negative("interest_rate", input.interest_rate)?;

    let working_years = input.retirement_age - input.current_age;
    require_horizon("retirement_age", working_years)?;
    let salary_growth = Decimal::ONE + periodic_rate(input.annual_salary_increase, 1);
    let share = input.contribution_percent / dec!(100);

    let mut salary = input.monthly_basic_salary;
    let acc = accumulate_yearly(
        working_years,
        input.current_age + 1,
        periodic_rate(input.interest_rate, 1),
        |year| {
            if year > 0 {
                salary = checked_mul(salary, salary_growth, "EPF salary growth")?;
            }
            let annual_salary = checked_mul(salary, dec!(12), "EPF salary")?;
            // Employee + employer
            checked_mul(annual_salary, share * dec!(2), "EPF contribution")
        },
    )?;

    let total_interest = acc.closing_balance - acc.total_contributed;

    let output = EpfOutput {
        working_years,
        total_contributed: acc.total_contributed,
        total_interest,
        total_corpus: acc.closing_balance,
        breakdown: Breakdown::new(vec![
            ("Total Contribution", acc.total_contributed),
            ("Total Interest", total_interest),
        ]),
        yearly_balances: acc.balances,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EPF yearly accumulation (contribute, then compound)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}
