use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use flexiwealth_core::retirement::nps::{self, NpsInput, DEFAULT_NPS_RETIREMENT_AGE};
use flexiwealth_core::retirement::planning::{self, RetirementInput, DEFAULT_LIFE_EXPECTANCY};

use super::required;
use crate::input;

/// Arguments for retirement corpus planning
#[derive(Args)]
pub struct RetirementArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long)]
    pub retirement_age: Option<u32>,

    #[arg(long, default_value_t = DEFAULT_LIFE_EXPECTANCY)]
    pub life_expectancy: u32,

    /// Current monthly household expenses
    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Savings already set aside for retirement
    #[arg(long, default_value = "0")]
    pub existing_corpus: Decimal,

    /// Expected annual inflation in percent
    #[arg(long, default_value = "6")]
    pub inflation: Decimal,

    /// Expected annual return until retirement, in percent
    #[arg(long)]
    pub pre_retirement_return: Option<Decimal>,

    /// Expected annual return after retirement, in percent
    #[arg(long)]
    pub post_retirement_return: Option<Decimal>,
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input: RetirementInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RetirementInput {
            current_age: args.current_age.ok_or_else(|| required("current-age"))?,
            retirement_age: args.retirement_age.ok_or_else(|| required("retirement-age"))?,
            life_expectancy: args.life_expectancy,
            monthly_expenses: args
                .monthly_expenses
                .ok_or_else(|| required("monthly-expenses"))?,
            existing_corpus: args.existing_corpus,
            inflation: args.inflation,
            pre_retirement_return: args
                .pre_retirement_return
                .ok_or_else(|| required("pre-retirement-return"))?,
            post_retirement_return: args
                .post_retirement_return
                .ok_or_else(|| required("post-retirement-return"))?,
        },
    };
    let result = planning::plan_retirement(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the NPS corpus and pension estimate
#[derive(Args)]
pub struct NpsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long, default_value_t = DEFAULT_NPS_RETIREMENT_AGE)]
    pub retirement_age: u32,

    /// Expected annual return on the corpus, in percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Share of the corpus used to buy an annuity, in percent (40 to 100)
    #[arg(long, default_value = "40")]
    pub annuity_percent: Decimal,

    /// Annual annuity rate, in percent
    #[arg(long, default_value = "6")]
    pub annuity_return: Decimal,
}

pub fn run_nps(args: NpsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let nps_input: NpsInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => NpsInput {
            monthly_investment: args
                .monthly_investment
                .ok_or_else(|| required("monthly-investment"))?,
            current_age: args.current_age.ok_or_else(|| required("current-age"))?,
            retirement_age: args.retirement_age,
            expected_return: args
                .expected_return
                .ok_or_else(|| required("expected-return"))?,
            annuity_percent: args.annuity_percent,
            annuity_return: args.annuity_return,
        },
    };
    let result = nps::calculate_nps(&nps_input)?;
    Ok(serde_json::to_value(result)?)
}
