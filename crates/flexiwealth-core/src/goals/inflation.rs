//! Inflation-adjusted goals: today's cost is grown to the goal date and the
//! resulting future cost becomes the target for a monthly SIP.
//!
//! Both the financial-goal and children's-education calculators go through
//! [`plan_inflation_adjusted_goal`], so they always share the SIP convention
//! of [`crate::time_value::required_contribution`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{
    checked_mul, clamp_growth, clamp_warning, compound, periodic_rate, periods_in,
    require_horizon, require_non_negative, required_contribution, AnnuityTiming,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Shared composition
// ---------------------------------------------------------------------------

/// Intermediate result shared by every inflation-adjusted goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationAdjustedPlan {
    pub future_cost: Money,
    pub months: u32,
    pub monthly_rate: Rate,
    pub required_sip: Money,
}

/// `C_future = C0 * (1 + g)^years`, then the ordinary-annuity SIP reaching it.
pub fn plan_inflation_adjusted_goal(
    present_cost: Money,
    years: u32,
    inflation: Percent,
    expected_return: Percent,
) -> CalcResult<InflationAdjustedPlan> {
    require_non_negative("present_cost", present_cost)?;
    require_non_negative("inflation", inflation)?;
    require_non_negative("expected_return", expected_return)?;
    require_horizon("years", years)?;

    let future_cost = checked_mul(
        present_cost,
        compound(periodic_rate(inflation, 1), years)?,
        "inflated goal cost",
    )?;
    let months = periods_in("years", years, 12)?;
    let monthly_rate = periodic_rate(expected_return, 12);
    let required_sip =
        required_contribution(future_cost, monthly_rate, months, AnnuityTiming::Ordinary)?;

    Ok(InflationAdjustedPlan {
        future_cost,
        months,
        monthly_rate,
        required_sip,
    })
}

// ---------------------------------------------------------------------------
// Financial goal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoalInput {
    /// What the goal would cost today.
    pub goal_amount: Money,
    pub years: u32,
    pub inflation: Percent,
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoalOutput {
    pub todays_cost: Money,
    pub future_cost: Money,
    pub required_sip: Money,
    pub months: u32,
    /// Today's cost plus the extra added by inflation.
    pub breakdown: Breakdown,
}

pub fn calculate_financial_goal(
    input: &FinancialGoalInput,
) -> CalcResult<ComputationOutput<FinancialGoalOutput>> {
    let start = Instant::now();

    let plan = plan_inflation_adjusted_goal(
        input.goal_amount,
        input.years,
        input.inflation,
        input.expected_return,
    )?;

    let output = FinancialGoalOutput {
        todays_cost: input.goal_amount,
        future_cost: plan.future_cost,
        required_sip: plan.required_sip,
        months: plan.months,
        breakdown: Breakdown::new(vec![
            ("Today's Cost", input.goal_amount),
            ("Inflation Impact", plan.future_cost - input.goal_amount),
        ]),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Inflation-adjusted goal with required SIP (ordinary annuity)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Children's education
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationInput {
    /// Present-day cost of the course.
    pub current_cost: Money,
    /// Years until the money is needed.
    pub years: u32,
    pub inflation: Percent,
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationOutput {
    pub future_cost: Money,
    pub required_sip: Money,
    pub total_invested: Money,
    pub total_growth: Money,
    pub raw_growth: Money,
    pub breakdown: Breakdown,
}

pub fn calculate_education_plan(
    input: &EducationInput,
) -> CalcResult<ComputationOutput<EducationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let plan = plan_inflation_adjusted_goal(
        input.current_cost,
        input.years,
        input.inflation,
        input.expected_return,
    )?;

    let total_invested = checked_mul(plan.required_sip, Decimal::from(plan.months), "total invested")?;
    let raw_growth = plan.future_cost - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = EducationOutput {
        future_cost: plan.future_cost,
        required_sip: plan.required_sip,
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
        "Education cost inflated to goal date, funded by monthly SIP (ordinary annuity)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
