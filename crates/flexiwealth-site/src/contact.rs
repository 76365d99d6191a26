use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{error, info};

use crate::config::SiteConfig;
use crate::error::ContactError;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// What the form shows after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ContactOutcome {
    fn accepted() -> Self {
        Self {
            success: true,
            message: "Thank you for your message!".into(),
            errors: Vec::new(),
        }
    }

    fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Validation failed.".into(),
            errors,
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: "An unexpected error occurred.".into(),
            errors: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trim every field, drop an empty phone, and check the form rules.
///
/// All failing fields are reported together, in form order.
pub fn validate_submission(raw: &ContactSubmission) -> Result<ContactSubmission, ContactError> {
    let submission = ContactSubmission {
        name: raw.name.trim().to_string(),
        email: raw.email.trim().to_string(),
        phone: raw
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        message: raw.message.trim().to_string(),
    };

    let mut errors = Vec::new();
    if submission.name.chars().count() < MIN_NAME_CHARS {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters.",
        ));
    }
    if !is_valid_email(&submission.email) {
        errors.push(FieldError::new("email", "Invalid email address."));
    }
    if submission.message.chars().count() < MIN_MESSAGE_CHARS {
        errors.push(FieldError::new(
            "message",
            "Message must be at least 10 characters.",
        ));
    }

    if errors.is_empty() {
        Ok(submission)
    } else {
        Err(ContactError::Validation(errors))
    }
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContactDelivery: Send + Sync {
    async fn deliver(
        &self,
        recipient: &str,
        submission: &ContactSubmission,
    ) -> Result<(), ContactError>;
}

/// Writes each submission to the log instead of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDelivery;

#[async_trait]
impl ContactDelivery for LogDelivery {
    async fn deliver(
        &self,
        recipient: &str,
        submission: &ContactSubmission,
    ) -> Result<(), ContactError> {
        info!(
            recipient,
            from_name = %submission.name,
            from_email = %submission.email,
            phone = submission.phone.as_deref().unwrap_or("-"),
            message = %submission.message,
            "new contact form submission"
        );
        Ok(())
    }
}

/// Validate, then hand the submission to `delivery` addressed to the
/// configured recipient. Never fails; problems come back in the outcome.
pub async fn submit_contact(
    delivery: &dyn ContactDelivery,
    config: &SiteConfig,
    raw: &ContactSubmission,
) -> ContactOutcome {
    let submission = match validate_submission(raw) {
        Ok(s) => s,
        Err(ContactError::Validation(errors)) => return ContactOutcome::rejected(errors),
        Err(e) => {
            error!(error = %e, "contact form validation");
            return ContactOutcome::failed();
        }
    };

    match delivery.deliver(&config.contact_recipient, &submission).await {
        Ok(()) => ContactOutcome::accepted(),
        Err(e) => {
            error!(error = %e, "contact form delivery");
            ContactOutcome::failed()
        }
    }
}
