//! Capability traits

mod endpoint;

pub use endpoint::Endpoint;
