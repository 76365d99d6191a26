use flexiwealth_core::loans::emi::{calculate_emi, EmiInput};
use flexiwealth_core::retirement::planning::{plan_retirement, RetirementInput};
use flexiwealth_core::statutory::epf::{calculate_epf, EpfInput};
use flexiwealth_core::statutory::ppf::{calculate_ppf, PpfInput, PPF_ANNUAL_CEILING};
use flexiwealth_core::time_value::{
    annuity_future_value, periodic_rate, required_contribution, AnnuityTiming,
};
use flexiwealth_core::wealth::human_life_value::{calculate_human_life_value, HlvInput};
use flexiwealth_core::wealth::net_worth::{calculate_net_worth, NetWorthEntry, NetWorthInput};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Annual percent with two decimals, 0.00% to 20.00%.
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=2000).prop_map(|bp| Decimal::new(bp, 2))
}

fn positive_percent() -> impl Strategy<Value = Decimal> {
    (1i64..=2000).prop_map(|bp| Decimal::new(bp, 2))
}

fn rupees(max: i64) -> impl Strategy<Value = Decimal> {
    (1i64..=max).prop_map(Decimal::from)
}

fn rows(max_len: usize) -> impl Strategy<Value = Vec<NetWorthEntry>> {
    prop::collection::vec(0i64..=10_000_000, 0..max_len).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| NetWorthEntry {
                label: format!("Row {i}"),
                amount: Decimal::from(amount),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn emi_repays_at_least_principal(
        principal in rupees(50_000_000),
        rate in positive_percent(),
        years in 1u32..=30,
    ) {
        let out = calculate_emi(&EmiInput {
            loan_amount: principal,
            annual_rate: rate,
            tenure_years: years,
        })
        .unwrap();
        prop_assert!(out.result.total_payable >= principal);
        prop_assert!(out.result.total_interest >= Decimal::ZERO);
    }

    #[test]
    fn emi_at_zero_rate_splits_principal_evenly(
        principal in rupees(50_000_000),
        years in 1u32..=30,
    ) {
        let out = calculate_emi(&EmiInput {
            loan_amount: principal,
            annual_rate: Decimal::ZERO,
            tenure_years: years,
        })
        .unwrap();
        let n = Decimal::from(years * 12);
        prop_assert_eq!(out.result.emi, principal / n);
        prop_assert_eq!(out.result.total_interest, Decimal::ZERO);
        prop_assert_eq!(out.result.total_payable, principal);
    }

    #[test]
    fn sip_contribution_round_trips(
        pmt in rupees(1_000_000),
        rate in percent(),
        months in 1u32..=360,
        due in any::<bool>(),
    ) {
        let timing = if due { AnnuityTiming::Due } else { AnnuityTiming::Ordinary };
        let i = periodic_rate(rate, 12);
        let fv = annuity_future_value(pmt, i, months, timing).unwrap();
        let back = required_contribution(fv, i, months, timing).unwrap();
        prop_assert!((back - pmt).abs() < dec!(0.0001), "{} vs {}", back, pmt);
    }

    #[test]
    fn epf_balances_never_decrease(
        salary in rupees(500_000),
        share in 0i64..=20,
        increase in percent(),
        interest in percent(),
        current_age in 18u32..=50,
        span in 1u32..=40,
    ) {
        let out = calculate_epf(&EpfInput {
            current_age,
            retirement_age: current_age + span,
            monthly_basic_salary: salary,
            contribution_percent: Decimal::from(share),
            annual_salary_increase: increase,
            interest_rate: interest,
        })
        .unwrap();
        let balances = &out.result.yearly_balances;
        prop_assert_eq!(balances.len() as u32, span);
        for pair in balances.windows(2) {
            prop_assert!(pair[1].value >= pair[0].value);
        }
    }

    #[test]
    fn ppf_balances_never_decrease(
        deposit in rupees(150_000),
        years in 15u32..=50,
        rate in percent(),
    ) {
        let out = calculate_ppf(&PpfInput {
            annual_investment: deposit,
            years,
            interest_rate: Some(rate),
        })
        .unwrap();
        for pair in out.result.yearly_balances.windows(2) {
            prop_assert!(pair[1].value >= pair[0].value);
        }
    }

    #[test]
    fn ppf_deposit_above_ceiling_matches_ceiling(
        excess in 1i64..=10_000_000,
        years in 15u32..=30,
    ) {
        let at_ceiling = calculate_ppf(&PpfInput {
            annual_investment: PPF_ANNUAL_CEILING,
            years,
            interest_rate: None,
        })
        .unwrap();
        let above = calculate_ppf(&PpfInput {
            annual_investment: PPF_ANNUAL_CEILING + Decimal::from(excess),
            years,
            interest_rate: None,
        })
        .unwrap();
        prop_assert_eq!(above.result.maturity_value, at_ceiling.result.maturity_value);
        prop_assert_eq!(above.warnings.len(), 1);
    }

    #[test]
    fn hlv_is_zero_when_return_does_not_beat_inflation(
        income in rupees(10_000_000),
        inflation in percent(),
        gap in 0i64..=1000,
        current_age in 18u32..=50,
        span in 1u32..=30,
    ) {
        let expected_return = (inflation - Decimal::new(gap, 2)).max(Decimal::ZERO);
        let out = calculate_human_life_value(&HlvInput {
            current_age,
            retirement_age: current_age + span,
            annual_income: income,
            personal_expenses: Decimal::ZERO,
            inflation,
            expected_return,
        })
        .unwrap();
        prop_assert_eq!(out.result.human_life_value, Decimal::ZERO);
    }

    #[test]
    fn retirement_sip_is_zero_without_shortfall(
        expenses in rupees(500_000),
        corpus in 0i64..=500_000_000,
        inflation in percent(),
        pre in percent(),
        post in percent(),
        current_age in 20u32..=55,
        to_retire in 1u32..=30,
    ) {
        let retirement_age = current_age + to_retire;
        let out = plan_retirement(&RetirementInput {
            current_age,
            retirement_age,
            life_expectancy: retirement_age + 20,
            monthly_expenses: expenses,
            existing_corpus: Decimal::from(corpus),
            inflation,
            pre_retirement_return: pre,
            post_retirement_return: post,
        })
        .unwrap();
        let r = &out.result;
        if r.shortfall <= Decimal::ZERO {
            prop_assert_eq!(r.monthly_sip_required, Decimal::ZERO);
        } else {
            prop_assert!(r.monthly_sip_required > Decimal::ZERO);
        }
        prop_assert!(r.total_growth >= Decimal::ZERO);
    }

    #[test]
    fn net_worth_ignores_row_order(assets in rows(8), liabilities in rows(8)) {
        let forward = calculate_net_worth(&NetWorthInput {
            assets: assets.clone(),
            liabilities: liabilities.clone(),
        })
        .unwrap();
        let reversed = calculate_net_worth(&NetWorthInput {
            assets: assets.into_iter().rev().collect(),
            liabilities: liabilities.into_iter().rev().collect(),
        })
        .unwrap();
        prop_assert_eq!(forward.result.net_worth, reversed.result.net_worth);
        prop_assert_eq!(
            forward.result.net_worth,
            forward.result.total_assets - forward.result.total_liabilities
        );
    }
}

#[test]
fn net_worth_of_empty_lists_is_zero() {
    let out = calculate_net_worth(&NetWorthInput::default()).unwrap();
    assert_eq!(out.result.net_worth, Decimal::ZERO);
}
