//! Type Conversions for EndpointError
//!
//! This module contains From trait implementations for converting
//! common error types into EndpointError.

use super::types::EndpointError;

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for EndpointError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
