//! Error Handling Module
//!
//! This module provides the error type shared by every part of the crate:
//! - Core error types (`EndpointError`, `ErrorCategory`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use langserve_endpoints::error::{EndpointError, ErrorCategory};
//!
//! let error = EndpointError::api_error(502, "bad gateway");
//! assert_eq!(error.category(), ErrorCategory::Server);
//! ```

mod conversions;
pub mod types;

pub use types::*;
