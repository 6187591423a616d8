use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the directory API and the workflow around it
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("User '{principal}' not found")]
    UserNotFound { principal: String },

    #[error("Principal '{principal}' matched {matches} directory objects, expected exactly one")]
    AmbiguousPrincipal { principal: String, matches: usize },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Throttled by the directory: {message}")]
    Throttled {
        retry_after: Option<Duration>,
        message: String,
    },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Directory API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DirectoryError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn user_not_found(principal: impl Into<String>) -> Self {
        Self::UserNotFound {
            principal: principal.into(),
        }
    }

    pub fn ambiguous_principal(principal: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousPrincipal {
            principal: principal.into(),
            matches,
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn throttled(retry_after: Option<Duration>, message: impl Into<String>) -> Self {
        Self::Throttled {
            retry_after,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether a retry may succeed. Auth, not-found and permission errors never
    /// change outcome on retry; throttling, transport faults and 5xx responses may.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Throttled { .. } | Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied wait hint, when the error carried one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Throttled { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
