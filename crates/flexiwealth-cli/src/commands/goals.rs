use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flexiwealth_core::goals::crorepati::{self, CrorepatiInput};
use flexiwealth_core::goals::inflation::{self, EducationInput, FinancialGoalInput};
use flexiwealth_core::goals::timeline::{self, GoalTimelineInput};

use super::required;
use crate::input;

/// Arguments for the SIP needed to reach a fixed corpus
#[derive(Args)]
pub struct CrorepatiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Corpus to reach
    #[arg(long, default_value = "10000000")]
    pub target_amount: Decimal,

    /// Years to reach it
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual return in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,
}

pub fn run_crorepati(args: CrorepatiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cp_input: CrorepatiInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CrorepatiInput {
            target_amount: args.target_amount,
            years: args.years.ok_or_else(|| required("years"))?,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
        },
    };
    let result = crorepati::calculate_crorepati_sip(&cp_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments shared by the inflation-adjusted goal planners
#[derive(Args)]
pub struct InflatedGoalArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cost of the goal at today's prices
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Years until the money is needed
    #[arg(long)]
    pub years: Option<u32>,

    /// Expected annual inflation in percent
    #[arg(long, default_value = "6")]
    pub inflation: Decimal,

    /// Expected annual return in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,
}

pub fn run_goal(args: InflatedGoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input: FinancialGoalInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FinancialGoalInput {
            goal_amount: args.cost.ok_or_else(|| required("cost"))?,
            years: args.years.ok_or_else(|| required("years"))?,
            inflation: args.inflation,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
        },
    };
    let result = inflation::calculate_financial_goal(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_education(args: InflatedGoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let edu_input: EducationInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EducationInput {
            current_cost: args.cost.ok_or_else(|| required("cost"))?,
            years: args.years.ok_or_else(|| required("years"))?,
            inflation: args.inflation,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
        },
    };
    let result = inflation::calculate_education_plan(&edu_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the time needed to reach a target with a fixed SIP
#[derive(Args)]
pub struct GoalTimelineArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Corpus to reach
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Monthly SIP amount
    #[arg(long)]
    pub monthly_sip: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,
}

pub fn run_goal_timeline(args: GoalTimelineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tl_input: GoalTimelineInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => GoalTimelineInput {
            target_amount: args.target_amount.ok_or_else(|| required("target-amount"))?,
            monthly_sip: args.monthly_sip.ok_or_else(|| required("monthly-sip"))?,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
        },
    };
    let result = timeline::calculate_goal_timeline(&tl_input)?;
    Ok(serde_json::to_value(result)?)
}
