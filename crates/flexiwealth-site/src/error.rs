use thiserror::Error;

use crate::contact::FieldError;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Could not decode {collection}: {reason}")]
    Decode { collection: String, reason: String },
}

#[derive(Debug, Error)]
pub enum SiteConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid site configuration: {field} — {reason}")]
    Invalid { field: String, reason: String },
}
