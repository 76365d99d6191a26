use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::inr::display_scalar;

/// Format output as tables: scalar result fields first, then one table per
/// breakdown or series the result carries.
pub fn print_table(value: &Value, inr: bool) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map, inr),
            _ => print_fields(map, inr),
        },
        Value::Array(arr) => print_rows(arr, inr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>, inr: bool) {
    print_fields(result, inr);

    for (key, val) in result {
        match val {
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                println!("\n{}:", title(key));
                print_rows(rows, inr);
            }
            Value::Object(inner) if inner.contains_key("items") => {
                if let Some(Value::Array(items)) = inner.get("items") {
                    println!("\n{}:", title(key));
                    print_rows(items, inr);
                }
            }
            _ => {}
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of the scalar fields; nested values get their own tables.
fn print_fields(map: &Map<String, Value>, inr: bool) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(key, val, inr)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(arr: &[Value], inr: bool) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value("", item, inr));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    map.get(h.as_str())
                        .map(|v| format_value(h, v, inr))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn title(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_value(key: &str, value: &Value, inr: bool) -> String {
    if let Some(shown) = display_scalar(key, value, inr) {
        return shown;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(key, v, inr)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
