//! Endpoint implementations
//!
//! - [`langserve`]: plain langserve runnables (CRLF dialect)
//! - [`ati_langserve`]: cookie-bound langserve runnables (LF dialect) with a
//!   rendered-prompt fallback

pub mod ati_langserve;
pub mod langserve;
pub mod request;

pub use ati_langserve::AtiLangserveEndpoint;
pub use langserve::{LangserveConfig, LangserveEndpoint};
