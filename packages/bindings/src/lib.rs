//! Node bindings: every calculator takes its input as a JSON string and
//! returns the full result envelope as a JSON string.

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use flexiwealth_core::CalcResult;
use flexiwealth_site::{submit_contact, ContactSubmission, LogDelivery, SiteConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse, compute, serialise.
fn run_json<I, O, F>(input_json: &str, calculate: F) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&I) -> CalcResult<O>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    run_json(&input_json, flexiwealth_core::investment::sip::calculate_sip_returns)
}

#[napi]
pub fn calculate_compounding(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::investment::compounding::calculate_compound_growth,
    )
}

#[napi]
pub fn compare_asset_classes(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::investment::comparison::compare_asset_classes,
    )
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    run_json(&input_json, flexiwealth_core::loans::emi::calculate_emi)
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_crorepati(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::goals::crorepati::calculate_crorepati_sip,
    )
}

#[napi]
pub fn calculate_financial_goal(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::goals::inflation::calculate_financial_goal,
    )
}

#[napi]
pub fn calculate_education_plan(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::goals::inflation::calculate_education_plan,
    )
}

#[napi]
pub fn calculate_goal_timeline(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::goals::timeline::calculate_goal_timeline,
    )
}

// ---------------------------------------------------------------------------
// Retirement
// ---------------------------------------------------------------------------

#[napi]
pub fn plan_retirement(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::retirement::planning::plan_retirement,
    )
}

#[napi]
pub fn calculate_nps(input_json: String) -> NapiResult<String> {
    run_json(&input_json, flexiwealth_core::retirement::nps::calculate_nps)
}

// ---------------------------------------------------------------------------
// Statutory schemes
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_epf(input_json: String) -> NapiResult<String> {
    run_json(&input_json, flexiwealth_core::statutory::epf::calculate_epf)
}

#[napi]
pub fn calculate_ppf(input_json: String) -> NapiResult<String> {
    run_json(&input_json, flexiwealth_core::statutory::ppf::calculate_ppf)
}

// ---------------------------------------------------------------------------
// Wealth
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_net_worth(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::wealth::net_worth::calculate_net_worth,
    )
}

#[napi]
pub fn calculate_human_life_value(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        flexiwealth_core::wealth::human_life_value::calculate_human_life_value,
    )
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// Validate and log a submission; returns `{success, message, errors?}`.
#[napi]
pub fn submit_contact_form(input_json: String) -> NapiResult<String> {
    let submission: ContactSubmission =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(to_napi_error)?;
    let outcome = rt.block_on(submit_contact(
        &LogDelivery,
        &SiteConfig::default(),
        &submission,
    ));
    serde_json::to_string(&outcome).map_err(to_napi_error)
}
