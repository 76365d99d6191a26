use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{
    checked_mul, clamp_growth, clamp_warning, periodic_rate, periods_to_target,
    require_non_negative, require_positive,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// How long a fixed monthly SIP takes to reach a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTimelineInput {
    pub target_amount: Money,
    pub monthly_sip: Money,
    pub expected_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTimelineOutput {
    /// Fractional months needed.
    pub months_required: Decimal,
    pub years_required: Decimal,
    pub total_invested: Money,
    pub total_growth: Money,
    pub raw_growth: Money,
    pub breakdown: Breakdown,
}

/// Solve the ordinary-annuity FV equation for `n`:
/// `n = ln(FV*i/M + 1) / ln(1+i)`.
pub fn calculate_goal_timeline(
    input: &GoalTimelineInput,
) -> CalcResult<ComputationOutput<GoalTimelineOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative("target_amount", input.target_amount)?;
    require_positive("monthly_sip", input.monthly_sip)?;
    require_non_negative("expected_return", input.expected_return)?;

    let i = periodic_rate(input.expected_return, 12);
    let months_required = periods_to_target(input.target_amount, input.monthly_sip, i)?;
    let years_required = months_required / dec!(12);

    let total_invested = checked_mul(input.monthly_sip, months_required, "total invested")?;
    let raw_growth = input.target_amount - total_invested;
    let total_growth = clamp_growth(raw_growth);
    warnings.extend(clamp_warning(raw_growth));

    let output = GoalTimelineOutput {
        months_required,
        years_required,
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
        "Months to target via logarithmic inversion of ordinary annuity FV",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_five_lakh_with_fifteen_thousand_sip() {
        let input = GoalTimelineInput {
            target_amount: dec!(2500000),
            monthly_sip: dec!(15000),
            expected_return: dec!(12),
        };
        let out = calculate_goal_timeline(&input).unwrap();
        let r = &out.result;
        // ln(2,500,000*0.01/15,000 + 1) / ln(1.01) ≈ 98.57 months
        assert!((r.months_required - dec!(98.57)).abs() < dec!(0.01), "{}", r.months_required);
        assert!((r.years_required - dec!(8.21)).abs() < dec!(0.01));
        assert!(r.total_growth > Decimal::ZERO);
    }

    #[test]
    fn test_zero_return_is_linear() {
        let input = GoalTimelineInput {
            target_amount: dec!(120000),
            monthly_sip: dec!(10000),
            expected_return: Decimal::ZERO,
        };
        let out = calculate_goal_timeline(&input).unwrap();
        assert_eq!(out.result.months_required, dec!(12));
        assert_eq!(out.result.years_required, dec!(1));
        assert_eq!(out.result.total_growth, Decimal::ZERO);
    }

    #[test]
    fn test_zero_sip_is_rejected() {
        let input = GoalTimelineInput {
            target_amount: dec!(120000),
            monthly_sip: Decimal::ZERO,
            expected_return: dec!(12),
        };
        assert!(calculate_goal_timeline(&input).is_err());
    }
}
