use serde_json::Value;

use super::inr::display_scalar;

/// Headline figure of each calculator, in priority order.
const PRIORITY_KEYS: [&str; 16] = [
    "emi",
    "required_sip",
    "monthly_sip_required",
    "future_value",
    "maturity_value",
    "total_corpus",
    "monthly_pension",
    "net_worth",
    "human_life_value",
    "years_required",
    "corpus_needed",
    "future_cost",
    "projected_value",
    "success",
    "value",
    "name",
];

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first scalar field in the result object.
pub fn print_minimal(value: &Value, inr: bool) {
    println!("{}", minimal_line(value, inr));
}

fn minimal_line(value: &Value, inr: bool) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    return format_minimal(key, val, inr);
                }
            }
            match map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
                Some((key, val)) => format!("{}: {}", key, format_minimal(key, val, inr)),
                None => format_minimal("", result_obj, inr),
            }
        }
        // Lists (stats, testimonials) print one headline per line
        Value::Array(items) => items
            .iter()
            .map(|item| minimal_line(item, inr))
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_minimal("", other, inr),
    }
}

fn format_minimal(key: &str, value: &Value, inr: bool) -> String {
    if let Some(shown) = display_scalar(key, value, inr) {
        return shown;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
