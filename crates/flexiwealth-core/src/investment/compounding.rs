use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{
    checked_mul, compound, periodic_rate, require_horizon, require_non_negative,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, SeriesPoint};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Supported compounding frequencies, serialised as periods per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompoundingFrequency {
    #[default]
    Annually,
    HalfYearly,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::HalfYearly => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

impl TryFrom<u32> for CompoundingFrequency {
    type Error = CalcError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CompoundingFrequency::Annually),
            2 => Ok(CompoundingFrequency::HalfYearly),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            other => Err(CalcError::InvalidConfiguration {
                field: "frequency".into(),
                reason: format!("unsupported compounding frequency {other}; expected 1, 2, 4 or 12"),
            }),
        }
    }
}

impl From<CompoundingFrequency> for u32 {
    fn from(f: CompoundingFrequency) -> u32 {
        f.periods_per_year()
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::HalfYearly => "Half-Yearly",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundingInput {
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_rate: Percent,
    pub years: u32,
    #[serde(default)]
    pub frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundingOutput {
    pub future_value: Money,
    pub total_interest: Money,
    pub breakdown: Breakdown,
    /// Value at the end of each year, 1..=years.
    pub yearly_values: Vec<SeriesPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Lump sum compounded `frequency` times a year:
/// `FV(t) = P * (1 + r/f)^(f*t)` for every whole year `t`.
pub fn calculate_compound_growth(
    input: &CompoundingInput,
) -> CalcResult<ComputationOutput<CompoundingOutput>> {
    let start = Instant::now();

    require_non_negative("principal", input.principal)?;
    require_non_negative("annual_rate", input.annual_rate)?;
    require_horizon("years", input.years)?;

    let per_year = input.frequency.periods_per_year();
    let rate = periodic_rate(input.annual_rate, per_year);
    let year_factor = compound(rate, per_year)?;

    let mut factor = Decimal::ONE;
    let mut yearly_values = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        factor = checked_mul(factor, year_factor, "compound growth factor")?;
        let value = checked_mul(input.principal, factor, "compound growth")?;
        yearly_values.push(SeriesPoint {
            period: year,
            value,
        });
    }

    let future_value = yearly_values
        .last()
        .map(|p| p.value)
        .unwrap_or(input.principal);
    let total_interest = future_value - input.principal;

    let output = CompoundingOutput {
        future_value,
        total_interest,
        breakdown: Breakdown::new(vec![
            ("Principal", input.principal),
            ("Interest", total_interest),
        ]),
        yearly_values,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Compound growth ({} compounding)", input.frequency),
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Convenience for callers that receive the frequency as a raw integer.
pub fn frequency_from_periods(periods: u32) -> CalcResult<CompoundingFrequency> {
    CompoundingFrequency::try_from(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(frequency: CompoundingFrequency) -> CompoundingInput {
        CompoundingInput {
            principal: dec!(100000),
            annual_rate: dec!(10),
            years: 10,
            frequency,
        }
    }

    #[test]
    fn test_annual_compounding() {
        let out = calculate_compound_growth(&input(CompoundingFrequency::Annually)).unwrap();
        // 100,000 * 1.1^10 = 259,374.2460
        assert_eq!(out.result.future_value.round_dp(4), dec!(259374.2460));
        assert_eq!(out.result.yearly_values.len(), 10);
        assert_eq!(out.result.yearly_values[0].value, dec!(110000));
    }

    #[test]
    fn test_more_frequent_compounding_grows_more() {
        let annual = calculate_compound_growth(&input(CompoundingFrequency::Annually)).unwrap();
        let monthly = calculate_compound_growth(&input(CompoundingFrequency::Monthly)).unwrap();
        assert!(monthly.result.future_value > annual.result.future_value);
    }

    #[test]
    fn test_series_is_monotonic() {
        let out = calculate_compound_growth(&input(CompoundingFrequency::Quarterly)).unwrap();
        for w in out.result.yearly_values.windows(2) {
            assert!(w[1].value > w[0].value);
            assert_eq!(w[1].period, w[0].period + 1);
        }
    }

    #[test]
    fn test_unsupported_frequency_is_invalid_configuration() {
        let err = frequency_from_periods(3).unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_frequency_deserialises_from_integer() {
        let json = r#"{"principal":"1000","annual_rate":"8","years":2,"frequency":4}"#;
        let parsed: CompoundingInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.frequency, CompoundingFrequency::Quarterly);

        let bad = r#"{"principal":"1000","annual_rate":"8","years":2,"frequency":5}"#;
        assert!(serde_json::from_str::<CompoundingInput>(bad).is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut i = input(CompoundingFrequency::Annually);
        i.principal = dec!(10000000000000000000000000);
        i.years = 100;
        assert!(matches!(
            calculate_compound_growth(&i),
            Err(CalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_rejects_horizon_beyond_limit() {
        let mut i = input(CompoundingFrequency::Monthly);
        i.years = 400_000_000;
        assert!(matches!(
            calculate_compound_growth(&i),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_rate_keeps_principal() {
        let mut i = input(CompoundingFrequency::Monthly);
        i.annual_rate = Decimal::ZERO;
        let out = calculate_compound_growth(&i).unwrap();
        assert_eq!(out.result.future_value, dec!(100000));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
    }
}
