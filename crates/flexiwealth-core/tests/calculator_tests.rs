use flexiwealth_core::goals::{crorepati, inflation, timeline};
use flexiwealth_core::investment::{comparison, compounding, sip};
use flexiwealth_core::loans::emi;
use flexiwealth_core::retirement::{nps, planning};
use flexiwealth_core::statutory::{epf, ppf};
use flexiwealth_core::wealth::{human_life_value, net_worth};
use flexiwealth_core::{BreakdownItem, CalcError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Investment
// ===========================================================================

#[test]
fn test_sip_twenty_five_thousand_for_ten_years() {
    let input = sip::SipInput {
        monthly_investment: dec!(25000),
        years: 10,
        expected_return: dec!(12.5),
    };
    let out = sip::calculate_sip_returns(&input).unwrap();
    let r = &out.result;
    assert_eq!(r.total_invested, dec!(3000000));
    assert!(
        r.future_value > dec!(5950000) && r.future_value < dec!(6020000),
        "Expected FV ~59.8 lakh, got {}",
        r.future_value
    );
    assert_eq!(r.total_growth, r.future_value - r.total_invested);
    assert_eq!(r.yearly_values.last().unwrap().value, r.future_value);
}

#[test]
fn test_sip_envelope_carries_assumptions() {
    let input = sip::SipInput {
        monthly_investment: dec!(1000),
        years: 1,
        expected_return: dec!(12),
    };
    let out = sip::calculate_sip_returns(&input).unwrap();
    assert!(out.methodology.contains("annuity-due"));
    assert_eq!(out.assumptions["years"], serde_json::json!(1));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_compounding_quarterly_beats_annual() {
    let mut input = compounding::CompoundingInput {
        principal: dec!(100000),
        annual_rate: dec!(10),
        years: 5,
        frequency: compounding::CompoundingFrequency::Annually,
    };
    let annual = compounding::calculate_compound_growth(&input).unwrap();
    input.frequency = compounding::CompoundingFrequency::Quarterly;
    let quarterly = compounding::calculate_compound_growth(&input).unwrap();

    assert_eq!(annual.result.future_value, dec!(161051));
    assert!(quarterly.result.future_value > annual.result.future_value);
}

#[test]
fn test_compounding_frequency_from_json_number() {
    let input: compounding::CompoundingInput = serde_json::from_str(
        r#"{"principal": "50000", "annual_rate": "8", "years": 3, "frequency": 12}"#,
    )
    .unwrap();
    assert_eq!(input.frequency, compounding::CompoundingFrequency::Monthly);

    let bad = serde_json::from_str::<compounding::CompoundingInput>(
        r#"{"principal": "50000", "annual_rate": "8", "years": 3, "frequency": 7}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn test_asset_comparison_ordering() {
    let input = comparison::ComparisonInput {
        initial_amount: dec!(100000),
        years: comparison::DEFAULT_HORIZON_YEARS,
        asset_classes: comparison::default_asset_classes(),
    };
    let out = comparison::compare_asset_classes(&input).unwrap();
    let values: Vec<Decimal> = out
        .result
        .projections
        .iter()
        .map(|p| p.projected_value)
        .collect();
    let mut sorted = values.clone();
    sorted.sort();
    assert_eq!(values, sorted);
    assert_eq!(out.result.projections.len(), 5);
}

// ===========================================================================
// Loans
// ===========================================================================

#[test]
fn test_emi_home_loan_breakdown() {
    let input = emi::EmiInput {
        loan_amount: dec!(2500000),
        annual_rate: dec!(8.5),
        tenure_years: 20,
    };
    let out = emi::calculate_emi(&input).unwrap();
    let r = &out.result;
    assert!(
        (r.emi - dec!(21695.58)).abs() < dec!(0.01),
        "Expected EMI ~21,695.58, got {}",
        r.emi
    );
    assert_eq!(r.breakdown.items[0].label, "Principal Amount");
    assert_eq!(r.breakdown.items[0].amount, dec!(2500000));
    assert_eq!(r.breakdown.total, r.total_payable);
    assert_eq!(r.schedule.len(), 20);
    assert_eq!(r.schedule.last().unwrap().closing_balance, Decimal::ZERO);
}

#[test]
fn test_emi_rejects_zero_tenure() {
    let input = emi::EmiInput {
        loan_amount: dec!(100000),
        annual_rate: dec!(9),
        tenure_years: 0,
    };
    match emi::calculate_emi(&input) {
        Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Goals
// ===========================================================================

#[test]
fn test_crorepati_one_crore_in_twenty_years() {
    let input = crorepati::CrorepatiInput {
        target_amount: dec!(10000000),
        years: 20,
        expected_return: dec!(12),
    };
    let out = crorepati::calculate_crorepati_sip(&input).unwrap();
    let r = &out.result;
    assert!(
        (r.required_sip - dec!(10109)).abs() < dec!(1),
        "Expected SIP ~10,109, got {}",
        r.required_sip
    );
    assert_eq!(r.months, 240);
}

#[test]
fn test_financial_goal_inflation_split() {
    let input = inflation::FinancialGoalInput {
        goal_amount: dec!(1000000),
        years: 10,
        inflation: dec!(6),
        expected_return: dec!(12),
    };
    let out = inflation::calculate_financial_goal(&input).unwrap();
    let r = &out.result;
    assert_eq!(r.todays_cost, dec!(1000000));
    assert!((r.future_cost - dec!(1790847.70)).abs() < dec!(0.01));
    assert_eq!(
        r.breakdown.items[1],
        BreakdownItem {
            label: "Inflation Impact".into(),
            amount: r.future_cost - r.todays_cost,
        }
    );
}

#[test]
fn test_education_plan_matches_goal_plan() {
    let goal = inflation::calculate_financial_goal(&inflation::FinancialGoalInput {
        goal_amount: dec!(2000000),
        years: 15,
        inflation: dec!(8),
        expected_return: dec!(11),
    })
    .unwrap();
    let education = inflation::calculate_education_plan(&inflation::EducationInput {
        current_cost: dec!(2000000),
        years: 15,
        inflation: dec!(8),
        expected_return: dec!(11),
    })
    .unwrap();
    assert_eq!(education.result.future_cost, goal.result.future_cost);
    assert_eq!(education.result.required_sip, goal.result.required_sip);
}

#[test]
fn test_goal_timeline_zero_rate_is_linear() {
    let input = timeline::GoalTimelineInput {
        target_amount: dec!(120000),
        monthly_sip: dec!(10000),
        expected_return: Decimal::ZERO,
    };
    let out = timeline::calculate_goal_timeline(&input).unwrap();
    assert_eq!(out.result.months_required, dec!(12));
    assert_eq!(out.result.years_required, dec!(1));
}

// ===========================================================================
// Retirement
// ===========================================================================

#[test]
fn test_retirement_large_corpus_needs_no_sip() {
    let input = planning::RetirementInput {
        current_age: 40,
        retirement_age: 60,
        life_expectancy: planning::DEFAULT_LIFE_EXPECTANCY,
        monthly_expenses: dec!(20000),
        existing_corpus: dec!(50000000),
        inflation: dec!(6),
        pre_retirement_return: dec!(10),
        post_retirement_return: dec!(8),
    };
    let out = planning::plan_retirement(&input).unwrap();
    let r = &out.result;
    assert!(r.shortfall <= Decimal::ZERO);
    assert_eq!(r.monthly_sip_required, Decimal::ZERO);
    assert_eq!(r.total_invested, dec!(50000000));
}

#[test]
fn test_nps_annuity_share_below_minimum_rejected() {
    let input = nps::NpsInput {
        monthly_investment: dec!(5000),
        current_age: 30,
        retirement_age: nps::DEFAULT_NPS_RETIREMENT_AGE,
        expected_return: dec!(10),
        annuity_percent: dec!(30),
        annuity_return: dec!(6),
    };
    assert!(nps::calculate_nps(&input).is_err());
}

// ===========================================================================
// Statutory
// ===========================================================================

#[test]
fn test_epf_corpus_exceeds_contributions() {
    let input = epf::EpfInput {
        current_age: 25,
        retirement_age: 58,
        monthly_basic_salary: dec!(50000),
        contribution_percent: dec!(12),
        annual_salary_increase: dec!(5),
        interest_rate: dec!(8.1),
    };
    let out = epf::calculate_epf(&input).unwrap();
    let r = &out.result;
    assert!(r.total_corpus > r.total_contributed);
    assert_eq!(r.breakdown.total, r.total_corpus);
}

#[test]
fn test_ppf_defaults_from_json() {
    let input: ppf::PpfInput =
        serde_json::from_str(r#"{"annual_investment": "150000", "years": 15}"#).unwrap();
    let out = ppf::calculate_ppf(&input).unwrap();
    assert_eq!(out.result.interest_rate, ppf::PPF_DEFAULT_RATE);
    assert!((out.result.maturity_value - dec!(4068209)).abs() < dec!(1));
}

// ===========================================================================
// Wealth
// ===========================================================================

#[test]
fn test_net_worth_from_json_rows() {
    let input: net_worth::NetWorthInput = serde_json::from_str(
        r#"{
            "assets": [
                {"label": "Savings Account", "amount": "500000"},
                {"label": "Mutual Funds", "amount": "750000"}
            ],
            "liabilities": [{"label": "Credit Card Debt", "amount": "50000"}]
        }"#,
    )
    .unwrap();
    let out = net_worth::calculate_net_worth(&input).unwrap();
    assert_eq!(out.result.total_assets, dec!(1250000));
    assert_eq!(out.result.net_worth, dec!(1200000));
}

#[test]
fn test_hlv_grows_with_income() {
    let mut input = human_life_value::HlvInput {
        current_age: 30,
        retirement_age: 60,
        annual_income: dec!(1000000),
        personal_expenses: dec!(200000),
        inflation: dec!(6),
        expected_return: dec!(8),
    };
    let base = human_life_value::calculate_human_life_value(&input)
        .unwrap()
        .result
        .human_life_value;
    input.annual_income = dec!(2000000);
    let higher = human_life_value::calculate_human_life_value(&input)
        .unwrap()
        .result
        .human_life_value;
    assert!(higher > base);
}
