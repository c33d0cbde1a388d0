//! Error types for expenseweb-api
//!
//! Maps the error taxonomy onto HTTP responses: validation failures
//! carry structured per-field messages for inline form display,
//! upstream failures become a generic message with the detail logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use expenseweb_client::ClientError;
use expenseweb_core::{CoreError, FieldErrors};
use serde::Serialize;
use thiserror::Error;

/// Main error type for expenseweb-api
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Validation failed")]
    Validation { errors: FieldErrors },

    #[error("Upstream backend failure")]
    Upstream,
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire shape for error responses
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { errors } => ApiError::Validation { errors },
            CoreError::UnknownChartMode { value } => ApiError::BadRequest {
                message: format!("Unknown chart mode: {}", value),
            },
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { resource } => ApiError::NotFound { resource },
            other => {
                log::error!("Upstream failure: {}", other);
                ApiError::Upstream
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: format!("Not found: {}", resource),
                    errors: None,
                },
            ),
            ApiError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    errors: None,
                },
            ),
            ApiError::Validation { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    message: "Missing or invalid fields.".to_string(),
                    errors: Some(errors),
                },
            ),
            ApiError::Upstream => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    message: "The expense backend is unavailable.".to_string(),
                    errors: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound {
            resource: "b1".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let response = ApiError::Validation {
            errors: FieldErrors::default(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_client_not_found_converts() {
        let err = ApiError::from(ClientError::NotFound {
            resource: "x".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn test_client_upstream_converts_to_generic() {
        let err = ApiError::from(ClientError::Upstream {
            status: 500,
            endpoint: "bills/b1".to_string(),
        });
        assert!(matches!(err, ApiError::Upstream));
    }
}
