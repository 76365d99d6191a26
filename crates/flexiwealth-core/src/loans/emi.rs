use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{
    checked_add, checked_mul, compound, periodic_rate, periods_in, require_horizon,
    require_non_negative, require_positive, require_positive_duration,
};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed-rate loan repaid in equal monthly instalments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub loan_amount: Money,
    /// Annual interest rate in percent.
    pub annual_rate: Percent,
    pub tenure_years: u32,
}

/// One year of the amortisation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub installments: u32,
    pub monthly_rate: Rate,
    pub emi: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    pub breakdown: Breakdown,
    pub schedule: Vec<AmortizationYear>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` at a zero rate.
pub fn emi_amount(principal: Money, monthly_rate: Rate, installments: u32) -> CalcResult<Money> {
    require_positive("loan_amount", principal)?;
    require_positive_duration("installments", installments)?;

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(installments));
    }

    let factor = compound(monthly_rate, installments)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }
    let interest = checked_mul(principal, monthly_rate, "EMI first-month interest")?;
    checked_mul(interest, factor / denominator, "EMI amount")
}

fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    emi: Money,
    installments: u32,
) -> CalcResult<Vec<AmortizationYear>> {
    let mut schedule = Vec::new();
    let mut balance = principal;
    let mut year = AmortizationYear {
        year: 1,
        opening_balance: balance,
        principal_paid: Decimal::ZERO,
        interest_paid: Decimal::ZERO,
        closing_balance: balance,
    };

    for month in 1..=installments {
        let interest = checked_mul(balance, monthly_rate, "amortization interest")?;
        // The last instalment clears whatever rounding residue is left.
        let principal_part = if month == installments {
            balance
        } else {
            (emi - interest).min(balance)
        };
        balance -= principal_part;

        year.principal_paid += principal_part;
        year.interest_paid = checked_add(year.interest_paid, interest, "amortization interest")?;
        year.closing_balance = balance;

        if month % 12 == 0 || month == installments {
            let next_year = year.year + 1;
            schedule.push(year);
            year = AmortizationYear {
                year: next_year,
                opening_balance: balance,
                principal_paid: Decimal::ZERO,
                interest_paid: Decimal::ZERO,
                closing_balance: balance,
            };
        }
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

pub fn calculate_emi(input: &EmiInput) -> CalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();

    require_positive("loan_amount", input.loan_amount)?;
    require_non_negative("annual_rate", input.annual_rate)?;
    require_horizon("tenure_years", input.tenure_years)?;

    let installments = periods_in("tenure_years", input.tenure_years, 12)?;
    let r = periodic_rate(input.annual_rate, 12);

    let emi = emi_amount(input.loan_amount, r, installments)?;
    // P/n is rarely exact, so a zero-rate loan is totalled at par.
    let (total_payable, total_interest) = if r.is_zero() {
        (input.loan_amount, Decimal::ZERO)
    } else {
        let total = checked_mul(emi, Decimal::from(installments), "EMI total payable")?;
        (total, total - input.loan_amount)
    };

    let schedule = build_schedule(input.loan_amount, r, emi, installments)?;

    let output = EmiOutput {
        installments,
        monthly_rate: r,
        emi,
        total_payable,
        total_interest,
        breakdown: Breakdown::new(vec![
            ("Principal Amount", input.loan_amount),
            ("Total Interest", total_interest),
        ]),
        schedule,
    };

    let methodology = if r.is_zero() {
        "EMI (zero interest: principal / instalments)"
    } else {
        "EMI (reducing balance, monthly rests)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, Vec::new(), elapsed, output))
}
