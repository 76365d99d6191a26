use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::types::{Money, Percent, Rate};
use crate::CalcResult;

/// Longest horizon, in years, any calculator accepts.
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// Whether a periodic contribution lands at the end (ordinary) or start (due)
/// of each compounding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnuityTiming {
    Ordinary,
    Due,
}

/// Convert an annual percentage into a per-period decimal rate.
pub fn periodic_rate(annual: Percent, periods_per_year: u32) -> Rate {
    annual / Decimal::from(periods_per_year) / dec!(100)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, n: u32) -> CalcResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::ONE);
    }
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(factor).ok_or_else(|| CalcError::Overflow {
            context: format!("compounding {rate} over {n} periods"),
        })?;
    }
    Ok(result)
}

/// Accumulated value of `nper` equal contributions of `pmt`.
///
/// Ordinary: `pmt * ((1+i)^n - 1) / i`. Due: the same times `(1+i)`.
/// At `i == 0` both collapse to `pmt * n`.
pub fn annuity_future_value(
    pmt: Money,
    rate: Rate,
    nper: u32,
    timing: AnnuityTiming,
) -> CalcResult<Money> {
    let factor = compound(rate, nper)?;
    annuity_value_from_factor(pmt, rate, nper, factor, timing)
}

/// [`annuity_future_value`] for a caller already holding `factor = (1+i)^nper`,
/// e.g. a series builder carrying the factor forward period by period.
pub fn annuity_value_from_factor(
    pmt: Money,
    rate: Rate,
    nper: u32,
    factor: Decimal,
    timing: AnnuityTiming,
) -> CalcResult<Money> {
    if rate.is_zero() {
        return checked_mul(pmt, Decimal::from(nper), "annuity future value");
    }

    let growth = checked_div(factor - Decimal::ONE, rate, "annuity growth factor")?;
    let mut fv = checked_mul(pmt, growth, "annuity future value")?;
    if timing == AnnuityTiming::Due {
        fv = checked_mul(fv, Decimal::ONE + rate, "annuity-due future value")?;
    }
    Ok(fv)
}

/// Contribution per period needed to accumulate `future_value` in `nper` periods.
pub fn required_contribution(
    future_value: Money,
    rate: Rate,
    nper: u32,
    timing: AnnuityTiming,
) -> CalcResult<Money> {
    require_positive_duration("nper", nper)?;

    if rate.is_zero() {
        return Ok(future_value / Decimal::from(nper));
    }

    let factor = compound(rate, nper)?;
    let mut annuity_factor = checked_div(factor - Decimal::ONE, rate, "annuity growth factor")?;
    if timing == AnnuityTiming::Due {
        annuity_factor = checked_mul(annuity_factor, Decimal::ONE + rate, "annuity-due factor")?;
    }

    if annuity_factor.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "required contribution annuity factor".into(),
        });
    }

    checked_div(future_value, annuity_factor, "required contribution")
}

/// Number of periods an ordinary annuity of `pmt` needs to reach `future_value`:
/// `ln(fv*i/pmt + 1) / ln(1+i)`, or `fv / pmt` at a zero rate.
pub fn periods_to_target(future_value: Money, pmt: Money, rate: Rate) -> CalcResult<Decimal> {
    if pmt <= Decimal::ZERO {
        return Err(CalcError::invalid("pmt", "Contribution must be > 0"));
    }
    if future_value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if rate.is_zero() {
        return checked_div(future_value, pmt, "periods to target");
    }

    let scaled = checked_mul(future_value, rate, "periods to target")?;
    let growth = checked_div(scaled, pmt, "periods to target")? + Decimal::ONE;
    let base = Decimal::ONE + rate;
    if growth <= Decimal::ZERO || base <= Decimal::ZERO {
        return Err(CalcError::invalid(
            "rate",
            "Target cannot be reached with this contribution and rate",
        ));
    }

    let denominator = base.ln();
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "periods to target log base".into(),
        });
    }
    checked_div(growth.ln(), denominator, "periods to target")
}

/// Present value of `n` payments starting at `cash_flow` and growing at `growth`,
/// discounted at `discount`:
/// `cf * (1 - ((1+g)/(1+r))^n) / (r - g)`.
///
/// Returns zero when `discount <= growth`; the closed form diverges there.
pub fn growing_annuity_pv(
    cash_flow: Money,
    discount: Rate,
    growth: Rate,
    n: u32,
) -> CalcResult<Money> {
    if discount <= growth {
        return Ok(Decimal::ZERO);
    }

    let one_plus_r = Decimal::ONE + discount;
    if one_plus_r <= Decimal::ZERO {
        return Err(CalcError::invalid(
            "discount",
            "Discount rate must be greater than -100%",
        ));
    }

    let ratio = (Decimal::ONE + growth) / one_plus_r;
    let ratio_n = compound(ratio - Decimal::ONE, n)?;
    let scaled = checked_mul(cash_flow, Decimal::ONE - ratio_n, "growing annuity present value")?;
    checked_div(scaled, discount - growth, "growing annuity present value")
}

/// Growth shown to a user is never negative.
pub fn clamp_growth(raw: Money) -> Money {
    raw.max(Decimal::ZERO)
}

/// Round to whole rupees, half away from zero.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Warning text for a growth figure that had to be clamped to zero.
pub(crate) fn clamp_warning(raw: Money) -> Option<String> {
    (raw < Decimal::ZERO).then(|| {
        format!(
            "Computed growth was negative ({}); reported as zero",
            raw.round_dp(2)
        )
    })
}

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

fn overflow(context: &str) -> CalcError {
    CalcError::Overflow {
        context: context.to_string(),
    }
}

pub fn checked_add(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

pub fn checked_mul(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

pub fn checked_div(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: context.to_string(),
        });
    }
    a.checked_div(b).ok_or_else(|| overflow(context))
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

pub fn require_non_negative(field: &str, value: Decimal) -> CalcResult<()> {
    if value < Decimal::ZERO {
        return Err(CalcError::invalid(field, format!("{field} must be >= 0")));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: Decimal) -> CalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(CalcError::invalid(field, format!("{field} must be > 0")));
    }
    Ok(())
}

pub fn require_positive_duration(field: &str, periods: u32) -> CalcResult<()> {
    if periods == 0 {
        return Err(CalcError::invalid(field, "invalid duration: must be > 0"));
    }
    Ok(())
}

/// A horizon in whole years: at least one, at most [`MAX_HORIZON_YEARS`].
pub fn require_horizon(field: &str, years: u32) -> CalcResult<()> {
    require_positive_duration(field, years)?;
    if years > MAX_HORIZON_YEARS {
        return Err(CalcError::invalid(
            field,
            format!("invalid duration: too long (at most {MAX_HORIZON_YEARS} years)"),
        ));
    }
    Ok(())
}

/// `years * periods_per_year`, rejecting counts that do not fit in a `u32`.
pub fn periods_in(field: &str, years: u32, periods_per_year: u32) -> CalcResult<u32> {
    years
        .checked_mul(periods_per_year)
        .ok_or_else(|| CalcError::invalid(field, "invalid duration: too long"))
}

pub fn require_percent_range(field: &str, value: Percent, min: Percent, max: Percent) -> CalcResult<()> {
    if value < min || value > max {
        return Err(CalcError::invalid(
            field,
            format!("{field} must be between {min}% and {max}%"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_matches_manual_product() {
        let result = compound(dec!(0.1), 3).unwrap();
        assert_eq!(result, dec!(1.331));
    }

    #[test]
    fn test_compound_zero_periods_is_one() {
        assert_eq!(compound(dec!(0.25), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        let result = compound(dec!(1), 200);
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn test_periodic_rate() {
        assert_eq!(periodic_rate(dec!(12), 12), dec!(0.01));
        assert_eq!(periodic_rate(dec!(8), 4), dec!(0.02));
    }

    #[test]
    fn test_annuity_due_exceeds_ordinary_by_one_period() {
        let i = dec!(0.01);
        let ordinary = annuity_future_value(dec!(1000), i, 12, AnnuityTiming::Ordinary).unwrap();
        let due = annuity_future_value(dec!(1000), i, 12, AnnuityTiming::Due).unwrap();
        assert_eq!(due, ordinary * dec!(1.01));
        // 1000 * (1.01^12 - 1) / 0.01 ≈ 12,682.50
        assert!((ordinary - dec!(12682.50)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_zero_rate_is_linear() {
        let fv = annuity_future_value(dec!(500), Decimal::ZERO, 24, AnnuityTiming::Due).unwrap();
        assert_eq!(fv, dec!(12000));
    }

    #[test]
    fn test_required_contribution_zero_rate() {
        let m = required_contribution(dec!(12000), Decimal::ZERO, 24, AnnuityTiming::Ordinary)
            .unwrap();
        assert_eq!(m, dec!(500));
    }

    #[test]
    fn test_required_contribution_rejects_zero_duration() {
        let result = required_contribution(dec!(1000), dec!(0.01), 0, AnnuityTiming::Ordinary);
        assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
    }

    #[test]
    fn test_required_contribution_inverts_future_value() {
        for timing in [AnnuityTiming::Ordinary, AnnuityTiming::Due] {
            let fv = annuity_future_value(dec!(2500), dec!(0.008), 180, timing).unwrap();
            let m = required_contribution(fv, dec!(0.008), 180, timing).unwrap();
            assert!((m - dec!(2500)).abs() < dec!(0.0001), "{timing:?}: {m}");
        }
    }

    #[test]
    fn test_periods_to_target_inverts_ordinary_annuity() {
        let fv = annuity_future_value(dec!(15000), dec!(0.01), 120, AnnuityTiming::Ordinary)
            .unwrap();
        let n = periods_to_target(fv, dec!(15000), dec!(0.01)).unwrap();
        assert!((n - dec!(120)).abs() < dec!(0.0001), "got {n}");
    }

    #[test]
    fn test_periods_to_target_zero_rate() {
        let n = periods_to_target(dec!(60000), dec!(5000), Decimal::ZERO).unwrap();
        assert_eq!(n, dec!(12));
    }

    #[test]
    fn test_periods_to_target_rejects_zero_contribution() {
        assert!(periods_to_target(dec!(1000), Decimal::ZERO, dec!(0.01)).is_err());
    }

    #[test]
    fn test_growing_annuity_pv_guard() {
        assert_eq!(
            growing_annuity_pv(dec!(100000), dec!(0.06), dec!(0.06), 20).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            growing_annuity_pv(dec!(100000), dec!(0.04), dec!(0.06), 20).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_growing_annuity_pv_without_growth_is_level_annuity() {
        // 100 * (1 - 1.08^-10) / 0.08 ≈ 671.01
        let pv = growing_annuity_pv(dec!(100), dec!(0.08), Decimal::ZERO, 10).unwrap();
        assert!((pv - dec!(671.01)).abs() < dec!(0.01), "got {pv}");
    }

    #[test]
    fn test_clamp_growth_and_warning() {
        assert_eq!(clamp_growth(dec!(-5)), Decimal::ZERO);
        assert_eq!(clamp_growth(dec!(5)), dec!(5));
        assert!(clamp_warning(dec!(-5)).is_some());
        assert!(clamp_warning(dec!(5)).is_none());
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(dec!(1234.5)), dec!(1235));
        assert_eq!(round_currency(dec!(1234.49)), dec!(1234));
    }

    #[test]
    fn test_horizon_guard() {
        assert!(require_horizon("years", 1).is_ok());
        assert!(require_horizon("years", MAX_HORIZON_YEARS).is_ok());
        assert!(matches!(
            require_horizon("years", MAX_HORIZON_YEARS + 1),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(require_horizon("years", 0).is_err());
    }

    #[test]
    fn test_periods_in_rejects_wrapping_counts() {
        assert_eq!(periods_in("years", 30, 12).unwrap(), 360);
        let err = periods_in("years", 400_000_000, 12).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_checked_helpers_report_overflow() {
        assert!(matches!(
            checked_mul(Decimal::MAX, dec!(2), "test"),
            Err(CalcError::Overflow { .. })
        ));
        assert!(matches!(
            checked_add(Decimal::MAX, Decimal::MAX, "test"),
            Err(CalcError::Overflow { .. })
        ));
        assert!(matches!(
            checked_div(dec!(1), Decimal::ZERO, "test"),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert_eq!(checked_div(dec!(10), dec!(4), "test").unwrap(), dec!(2.5));
    }

    #[test]
    fn test_annuity_future_value_overflow_is_an_error() {
        // (1.01^600 - 1) / 0.01 is about 3.9e4, so the product exceeds Decimal::MAX.
        let result = annuity_future_value(dec!(10000000000000000000000000), dec!(0.01), 600, AnnuityTiming::Due);
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn test_annuity_value_from_running_factor_matches_closed_form() {
        let i = dec!(0.01);
        let mut factor = Decimal::ONE;
        for _ in 0..24 {
            factor *= Decimal::ONE + i;
        }
        let carried =
            annuity_value_from_factor(dec!(1000), i, 24, factor, AnnuityTiming::Ordinary).unwrap();
        let direct = annuity_future_value(dec!(1000), i, 24, AnnuityTiming::Ordinary).unwrap();
        assert_eq!(carried, direct);
    }

    #[test]
    fn test_percent_range_guard() {
        assert!(require_percent_range("pct", dec!(40), dec!(40), dec!(100)).is_ok());
        assert!(require_percent_range("pct", dec!(39.9), dec!(40), dec!(100)).is_err());
        assert!(require_percent_range("pct", dec!(100.1), dec!(40), dec!(100)).is_err());
    }
}
