//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::PlatformError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: PlatformError) -> Problem {
    match error {
        PlatformError::Validation { field, message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(format!("{}: {}", field, message))
        }

        PlatformError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", resource))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        PlatformError::InvalidStateTransition { from, to } => {
            Problem::new(StatusCode::CONFLICT, "Invalid Status Transition")
                .with_detail(format!("cannot transition from '{}' to '{}'", from, to))
        }

        // deliberately uninformative: no distinction between
        // unauthenticated and non-admin
        PlatformError::PermissionDenied => {
            Problem::new(StatusCode::FORBIDDEN, "Permission Denied")
        }

        PlatformError::BackendUnavailable { reason } => {
            tracing::error!(reason, "durable backend unavailable on write path");
            Problem::new(StatusCode::SERVICE_UNAVAILABLE, "Backend Unavailable")
                .with_detail("The write could not be persisted; please retry")
        }

        PlatformError::InvalidMode { value } => {
            Problem::new(StatusCode::BAD_REQUEST, "Invalid Mode")
                .with_detail(format!("'{}' is not a recognized mode", value))
        }

        PlatformError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}
