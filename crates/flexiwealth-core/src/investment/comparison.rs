//! Lump-sum projection across common Indian asset classes, used by the
//! home-page "what could your money become" chart.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{
    checked_mul, compound, periodic_rate, require_horizon, require_non_negative, round_currency,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// Default projection horizon in years.
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClass {
    pub name: String,
    /// Assumed annual return in percent.
    pub annual_return: Percent,
}

impl AssetClass {
    fn new(name: &str, annual_return: Percent) -> Self {
        AssetClass {
            name: name.to_string(),
            annual_return,
        }
    }
}

/// Asset classes shown when the caller does not supply its own.
pub fn default_asset_classes() -> Vec<AssetClass> {
    vec![
        AssetClass::new("Savings Account", dec!(3)),
        AssetClass::new("Fixed Deposit", dec!(6.5)),
        AssetClass::new("Gold", dec!(8)),
        AssetClass::new("Mutual Funds", dec!(12)),
        AssetClass::new("Stock Market", dec!(15)),
    ]
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub initial_amount: Money,
    #[serde(default = "default_horizon")]
    pub years: u32,
    #[serde(default = "default_asset_classes")]
    pub asset_classes: Vec<AssetClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetProjection {
    pub name: String,
    pub annual_return: Percent,
    /// Projected value rounded to whole rupees.
    pub projected_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub years: u32,
    /// Sorted ascending by projected value.
    pub projections: Vec<AssetProjection>,
}

/// Project `initial_amount` with annual compounding for each asset class.
pub fn compare_asset_classes(
    input: &ComparisonInput,
) -> CalcResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    require_non_negative("initial_amount", input.initial_amount)?;
    require_horizon("years", input.years)?;
    if input.asset_classes.is_empty() {
        return Err(CalcError::invalid(
            "asset_classes",
            "At least one asset class is required",
        ));
    }

    let mut projections = Vec::with_capacity(input.asset_classes.len());
    for class in &input.asset_classes {
        require_non_negative("annual_return", class.annual_return)?;
        let growth = compound(periodic_rate(class.annual_return, 1), input.years)?;
        projections.push(AssetProjection {
            name: class.name.clone(),
            annual_return: class.annual_return,
            projected_value: round_currency(checked_mul(
                input.initial_amount,
                growth,
                "asset class projection",
            )?),
        });
    }
    projections.sort_by(|a, b| a.projected_value.cmp(&b.projected_value));

    let output = ComparisonOutput {
        years: input.years,
        projections,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump-sum annual compounding per asset class",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}
