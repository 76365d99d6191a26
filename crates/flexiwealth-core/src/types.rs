use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values (rupees). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates as entered by the user, in percent (12.5 = 12.5%).
pub type Percent = Decimal;

/// Per-period rates as decimals (0.0104 = 1.04% per period). Never as percentages.
pub type Rate = Decimal;

/// One point of a per-period projection (year, month or age).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: u32,
    pub value: Money,
}

/// A labelled slice of a total, e.g. principal vs. interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub amount: Money,
}

/// Proportional split of a total; `items` always sum to `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub items: Vec<BreakdownItem>,
    pub total: Money,
}

impl Breakdown {
    pub fn new(items: Vec<(&str, Money)>) -> Self {
        let items: Vec<BreakdownItem> = items
            .into_iter()
            .map(|(label, amount)| BreakdownItem {
                label: label.to_string(),
                amount,
            })
            .collect();
        let total = items.iter().map(|i| i.amount).sum();
        Breakdown { items, total }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
