//! Core error types

use thiserror::Error;

/// Coarse classification of an [`EndpointError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Client,
    Parsing,
    Configuration,
    NotFound,
    Unknown,
}

/// The error type for endpoint adapters, the search-log sink and the vote route.
#[derive(Debug, Clone, Error)]
pub enum EndpointError {
    /// Transport failure while connecting or sending a request.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Upstream answered with a non-success status. `message` is the raw body.
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// Transport failure while reading a response body that was already accepted.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A payload could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The primary conversation store has no matching record.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl EndpointError {
    /// Build an `ApiError` from a status code and a response body.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::StreamError(_) => ErrorCategory::Network,
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { code: 404, .. } | Self::NotFound(_) => ErrorCategory::NotFound,
            Self::ApiError { .. } | Self::InvalidParameter(_) => ErrorCategory::Client,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InternalError(_) => ErrorCategory::Unknown,
        }
    }

    /// HTTP status associated with this error, when one applies.
    ///
    /// Upstream statuses are reported as-is; local conditions map to the
    /// status a route handler should answer with.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::NotFound(_) => Some(404),
            Self::InvalidParameter(_) => Some(400),
            _ => None,
        }
    }

    /// Short message suitable for end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => format!("Failed to generate text: {message}"),
            Self::NotFound(what) => what.clone(),
            Self::InvalidParameter(msg) => msg.clone(),
            Self::HttpError(_) | Self::StreamError(_) => {
                "The generation service is unreachable".to_string()
            }
            other => other.to_string(),
        }
    }
}
