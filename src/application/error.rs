// src/application/error.rs
use crate::domain::errors::{DomainError, FieldErrors};
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid component fields")]
    InvalidFields(FieldErrors),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("unknown spot: {0}")]
    UnknownSpot(String),

    #[error("component '{component}' cannot be placed in spot '{spot}'")]
    ComponentNotAllowed { component: String, spot: String },

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Lift domain errors into their application-level counterparts so the
    /// HTTP layer can pick a status without inspecting nested variants.
    pub fn normalize(self) -> Self {
        match self {
            Self::Domain(DomainError::Validation(msg)) => Self::Validation(msg),
            Self::Domain(DomainError::InvalidFields(fields)) => Self::InvalidFields(fields),
            Self::Domain(DomainError::NotFound(msg)) => Self::NotFound(msg),
            Self::Domain(DomainError::Conflict(msg)) => Self::Conflict(msg),
            Self::Domain(DomainError::Persistence(msg)) => Self::Infrastructure(msg),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_unwraps_domain_errors() {
        let err = ApplicationError::from(DomainError::NotFound("page".into())).normalize();
        assert!(matches!(err, ApplicationError::NotFound(msg) if msg == "page"));

        let err = ApplicationError::from(DomainError::Persistence("down".into())).normalize();
        assert!(matches!(err, ApplicationError::Infrastructure(_)));

        let err = ApplicationError::validation("bad").normalize();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }
}
