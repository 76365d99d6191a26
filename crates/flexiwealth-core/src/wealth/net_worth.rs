use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{checked_add, require_non_negative};
use crate::types::{with_metadata, Breakdown, ComputationOutput, Money};
use crate::CalcResult;

/// One user-entered row, e.g. "Savings Account: 5,00,000".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorthEntry {
    pub label: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetWorthInput {
    #[serde(default)]
    pub assets: Vec<NetWorthEntry>,
    #[serde(default)]
    pub liabilities: Vec<NetWorthEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorthOutput {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
    /// Per-row split of assets, in entry order.
    pub assets: Breakdown,
    /// Per-row split of liabilities, in entry order.
    pub liabilities: Breakdown,
}

fn side_breakdown(field: &str, entries: &[NetWorthEntry]) -> CalcResult<Breakdown> {
    for entry in entries {
        require_non_negative(field, entry.amount)?;
    }
    // Breakdown::new sums unchecked.
    entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| checked_add(acc, e.amount, field))?;
    Ok(Breakdown::new(
        entries
            .iter()
            .map(|e| (e.label.as_str(), e.amount))
            .collect(),
    ))
}

/// `sum(assets) - sum(liabilities)`. Either list may be empty.
pub fn calculate_net_worth(input: &NetWorthInput) -> CalcResult<ComputationOutput<NetWorthOutput>> {
    let start = Instant::now();

    let assets = side_breakdown("assets", &input.assets)?;
    let liabilities = side_breakdown("liabilities", &input.liabilities)?;

    let output = NetWorthOutput {
        total_assets: assets.total,
        total_liabilities: liabilities.total,
        net_worth: assets.total - liabilities.total,
        assets,
        liabilities,
    };

    let mut warnings = Vec::new();
    if output.net_worth < Decimal::ZERO {
        warnings.push("Liabilities exceed assets".to_string());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sum of assets less sum of liabilities",
        input,
        warnings,
        elapsed,
        output,
    ))
}
