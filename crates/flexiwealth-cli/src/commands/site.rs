use clap::Args;
use serde_json::Value;
use std::future::Future;

use flexiwealth_site::{
    submit_contact, ContactSubmission, FallbackDisplayData, LogDelivery, SiteConfig,
};

use super::required;
use crate::input;

/// Site commands are the only async work; each gets a small runtime.
fn block_on<F: Future>(fut: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(fut))
}

/// Arguments for a contact-form submission
#[derive(Args)]
pub struct ContactArgs {
    /// Path to JSON/YAML submission file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub message: Option<String>,
}

pub fn run_contact(
    args: ContactArgs,
    config: &SiteConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let submission: ContactSubmission = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ContactSubmission {
            name: args.name.ok_or_else(|| required("name"))?,
            email: args.email.ok_or_else(|| required("email"))?,
            phone: args.phone,
            message: args.message.ok_or_else(|| required("message"))?,
        },
    };

    let outcome = block_on(submit_contact(&LogDelivery, config, &submission))?;
    if !outcome.success {
        let details: Vec<String> = outcome
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        return Err(if details.is_empty() {
            outcome.message.into()
        } else {
            format!("{} {}", outcome.message, details.join("; ")).into()
        });
    }
    Ok(serde_json::to_value(outcome)?)
}

/// Arguments for the stats and testimonials listings
#[derive(Args)]
pub struct DisplayArgs {
    /// Serve the built-in data without contacting the configured remote source
    #[arg(long)]
    pub offline: bool,
}

fn display_source(args: &DisplayArgs, config: &SiteConfig) -> FallbackDisplayData {
    if args.offline {
        FallbackDisplayData::defaults_only()
    } else {
        FallbackDisplayData::from_config(config)
    }
}

pub fn run_stats(args: DisplayArgs, config: &SiteConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let source = display_source(&args, config);
    let stats = block_on(source.stats())?;
    Ok(serde_json::to_value(stats)?)
}

pub fn run_testimonials(
    args: DisplayArgs,
    config: &SiteConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let source = display_source(&args, config);
    let testimonials = block_on(source.testimonials())?;
    Ok(serde_json::to_value(testimonials)?)
}
