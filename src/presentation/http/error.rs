use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::errors::FieldErrors;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    fields: Option<FieldErrors>,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err.normalize() {
            ApplicationError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ApplicationError::InvalidFields(fields) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "component fields are invalid".into(),
                fields: Some(fields),
            },
            err @ (ApplicationError::UnknownComponent(_)
            | ApplicationError::UnknownSpot(_)
            | ApplicationError::ComponentNotAllowed { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            ApplicationError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ApplicationError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ApplicationError::Infrastructure(msg) => {
                error!(error = %msg, "request failed on infrastructure error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".into(),
                )
            }
            ApplicationError::Domain(domain_err) => {
                Self::new(StatusCode::BAD_REQUEST, domain_err.to_string())
            }
        }
    }

    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            fields: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
            fields: self.fields,
        };
        (self.status, Json(payload)).into_response()
    }
}

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field messages when component fields fail validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn layout_errors_are_client_errors() {
        let cases = [
            ApplicationError::UnknownComponent("nope".into()),
            ApplicationError::UnknownSpot("nowhere".into()),
            ApplicationError::ComponentNotAllowed {
                component: "promo".into(),
                spot: "masthead".into(),
            },
            ApplicationError::from(DomainError::InvalidFields(FieldErrors::new())),
        ];
        for err in cases {
            assert_eq!(HttpError::from_error(err).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn domain_errors_map_through_normalize() {
        let not_found = ApplicationError::from(DomainError::NotFound("x".into()));
        assert_eq!(HttpError::from_error(not_found).status(), StatusCode::NOT_FOUND);

        let conflict = ApplicationError::from(DomainError::Conflict("x".into()));
        assert_eq!(HttpError::from_error(conflict).status(), StatusCode::CONFLICT);

        let broken = ApplicationError::from(DomainError::Persistence("x".into()));
        assert_eq!(
            HttpError::from_error(broken).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
