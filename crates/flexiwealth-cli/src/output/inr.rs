use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Whether a result field holds rupees rather than a rate, age or count.
pub fn is_money_key(key: &str) -> bool {
    let not_money = key.ends_with("rate")
        || key.ends_with("percent")
        || key.ends_with("return")
        || key.ends_with("age")
        || key.ends_with("years")
        || key.ends_with("months")
        || key.starts_with("years_")
        || key.starts_with("months_")
        || matches!(
            key,
            "id" | "installments" | "period" | "year" | "frequency" | "inflation" | "order"
        );
    !not_money
}

/// Render an amount with Indian digit grouping, e.g. `₹12,34,567.89`.
/// Paise are dropped when they round to zero.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let rupees = abs.trunc();
    let paise = ((abs - rupees) * Decimal::ONE_HUNDRED).trunc();

    let digits = rupees.to_string();
    let grouped = group_indian(&digits);
    if paise.is_zero() {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{:0>2}", paise.to_string())
    }
}

/// Last three digits, then pairs: 1234567 -> 12,34,567.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Parse a decimal carried as a JSON string or number.
pub fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        // Floats such as 500.0 show as 500.
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok().map(|d| d.normalize()),
        _ => None,
    }
}

/// Display form of a scalar result field: decimals to two places, rupee
/// fields in INR when `inr` is set.
pub fn display_scalar(key: &str, value: &Value, inr: bool) -> Option<String> {
    let amount = as_decimal(value)?;
    if inr && is_money_key(key) {
        return Some(format_inr(amount));
    }
    if amount.scale() > 2 {
        Some(amount.round_dp(2).normalize().to_string())
    } else {
        Some(amount.to_string())
    }
}
