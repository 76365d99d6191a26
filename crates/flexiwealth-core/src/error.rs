use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError(e.to_string())
    }
}
