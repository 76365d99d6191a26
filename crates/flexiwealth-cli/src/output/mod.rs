pub mod csv_out;
pub mod inr;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// How a command result is rendered.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Show rupee fields with Indian grouping and the ₹ sign (table/minimal only).
    pub inr: bool,
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(options: &OutputOptions, value: &Value) {
    match options.format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value, options.inr),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value, options.inr),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
