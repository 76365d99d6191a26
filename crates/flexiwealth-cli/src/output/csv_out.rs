use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
///
/// A result carrying a per-period series (yearly values, an amortization
/// schedule, balances) is written as that series, one row per period.
/// Otherwise the scalar result fields are written as `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => match series_of(result) {
                Some(rows) => write_rows(&mut wtr, rows),
                None => write_fields(&mut wtr, result),
            },
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

/// First array-of-objects field of the result, if any.
fn series_of(result: &Map<String, Value>) -> Option<&[Value]> {
    result.values().find_map(|v| match v {
        Value::Array(rows) if !rows.is_empty() && rows.iter().all(Value::is_object) => {
            Some(rows.as_slice())
        }
        _ => None,
    })
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(map: &Map<String, Value>) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        match series_of(map) {
            Some(rows) => write_rows(&mut wtr, rows),
            None => write_fields(&mut wtr, map),
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_series_preferred_over_fields() {
        let result = json!({
            "future_value": "1000",
            "yearly_values": [{"period": 1, "value": "500"}, {"period": 2, "value": "1000"}]
        });
        let out = render(result.as_object().unwrap());
        assert_eq!(out, "period,value\n1,500\n2,1000\n");
    }

    #[test]
    fn test_scalar_fields_without_series() {
        let result = json!({"net_worth": "450000", "total_assets": "500000"});
        let out = render(result.as_object().unwrap());
        assert_eq!(out, "field,value\nnet_worth,450000\ntotal_assets,500000\n");
    }
}
