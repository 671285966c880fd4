//! Contract error types for the clinic platform
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! Problem Details responses.

/// Platform domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Malformed or missing required input
    Validation {
        /// Offending field
        field: String,
        /// Validation error message
        message: String,
    },
    /// Lookup by identity/key found nothing
    NotFound {
        /// Resource type (clinic, appointment, config, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Attempted an illegal status change
    InvalidStateTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
    /// Non-admin attempted an admin-only mutation.
    /// Intentionally carries no detail: the message must not reveal
    /// whether the caller was unauthenticated or merely not admin.
    PermissionDenied,
    /// Durable backend could not be reached on a write path
    BackendUnavailable {
        /// Underlying failure description
        reason: String,
    },
    /// Attempted to set an unrecognized content mode
    InvalidMode {
        /// Rejected value
        value: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Validation error on '{}': {}", field, message)
            }
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::InvalidStateTransition { from, to } => {
                write!(f, "Illegal status transition: {} -> {}", from, to)
            }
            Self::PermissionDenied => {
                write!(f, "Permission denied")
            }
            Self::BackendUnavailable { reason } => {
                write!(f, "Backend unavailable: {}", reason)
            }
            Self::InvalidMode { value } => {
                write!(f, "Invalid mode: {}", value)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

impl PlatformError {
    /// Wrap a repository failure as a write-path backend error.
    pub fn backend(err: anyhow::Error) -> Self {
        Self::BackendUnavailable {
            reason: err.to_string(),
        }
    }

    /// Shorthand for a validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a not-found failure.
    pub fn not_found(resource: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }
}
