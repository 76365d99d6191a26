pub mod epf;
pub mod ppf;

use rust_decimal::Decimal;

use crate::error::CalcError;
use crate::time_value::checked_add;
use crate::types::{Money, Rate, SeriesPoint};
use crate::CalcResult;

/// Running totals of a year-by-year accumulation.
#[derive(Debug, Clone)]
pub(crate) struct Accumulation {
    pub balances: Vec<SeriesPoint>,
    pub total_contributed: Money,
    pub closing_balance: Money,
}

/// Contribute, then compound, once per year for `years` years.
///
/// `contribution(year)` is called with the zero-based year index. Points are
/// labelled `first_period + year`. The order of the two steps is part of the
/// scheme rules and must not be swapped.
pub(crate) fn accumulate_yearly<F>(
    years: u32,
    first_period: u32,
    rate: Rate,
    mut contribution: F,
) -> CalcResult<Accumulation>
where
    F: FnMut(u32) -> CalcResult<Money>,
{
    let growth = Decimal::ONE + rate;
    let mut balance = Decimal::ZERO;
    let mut total_contributed = Decimal::ZERO;
    let mut balances = Vec::with_capacity(years as usize);

    for year in 0..years {
        let deposit = contribution(year)?;
        total_contributed = checked_add(total_contributed, deposit, "yearly contributions")?;
        balance = checked_add(balance, deposit, "yearly accumulation")?
            .checked_mul(growth)
            .ok_or_else(|| CalcError::Overflow {
                context: format!("yearly accumulation at year {}", year + 1),
            })?;
        balances.push(SeriesPoint {
            period: first_period + year,
            value: balance,
        });
    }

    Ok(Accumulation {
        balances,
        total_contributed,
        closing_balance: balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contribute_then_compound() {
        let acc = accumulate_yearly(2, 1, dec!(0.10), |_| Ok(dec!(100))).unwrap();
        // Year 1: (0 + 100) * 1.1 = 110; year 2: (110 + 100) * 1.1 = 231
        assert_eq!(acc.balances[0].value, dec!(110));
        assert_eq!(acc.closing_balance, dec!(231));
        assert_eq!(acc.total_contributed, dec!(200));
    }

    #[test]
    fn test_periods_are_labelled_from_first_period() {
        let acc = accumulate_yearly(3, 26, dec!(0.05), |_| Ok(dec!(1))).unwrap();
        let periods: Vec<u32> = acc.balances.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![26, 27, 28]);
    }

    #[test]
    fn test_zero_years_is_empty() {
        let acc = accumulate_yearly(0, 1, dec!(0.05), |_| Ok(dec!(1))).unwrap();
        assert!(acc.balances.is_empty());
        assert_eq!(acc.closing_balance, Decimal::ZERO);
    }
}
