// src/domain/errors.rs
use std::collections::BTreeMap;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Field name to human readable message, as produced by component validation.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid fields: {}", summarize(.0))]
    InvalidFields(FieldErrors),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fields_message_lists_each_field() {
        let mut errors = FieldErrors::new();
        errors.insert("headline".into(), "this field is required".into());
        errors.insert("count".into(), "must be at most 5".into());
        let message = DomainError::InvalidFields(errors).to_string();
        assert_eq!(
            message,
            "invalid fields: count: must be at most 5, headline: this field is required"
        );
    }
}
