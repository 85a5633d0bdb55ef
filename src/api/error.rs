use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::clients::NasaError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    /// Required upstream settings are missing or malformed.
    ConfigurationError(String),

    ExternalApiError { service: String, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ConfigurationError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server is missing NASA API configuration".to_string(),
                )
            }
            ApiError::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        let body = ErrorResponse::new(error_message);
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    /// Maps an upstream failure while fetching `resource`.
    ///
    /// Rate limits, timeouts and upstream 404s read as "nothing found" to
    /// the dashboard; anything else is a generic failure.
    pub fn from_nasa(resource: &str, err: NasaError) -> Self {
        match err {
            NasaError::MissingConfig(_) | NasaError::InvalidUrl(_) => {
                ApiError::ConfigurationError(err.to_string())
            }
            NasaError::RateLimited => ApiError::NotFound(format!(
                "No {} available: NASA API rate limit exceeded",
                resource
            )),
            NasaError::Timeout => ApiError::NotFound(format!(
                "No {} available: NASA API request timed out",
                resource
            )),
            NasaError::Status { status: 404, .. } => {
                ApiError::NotFound(format!("No {} found", resource))
            }
            other => ApiError::ExternalApiError {
                service: "NASA".to_string(),
                message: format!("Failed to fetch {}: {}", resource, other.kind()),
            },
        }
    }
}
