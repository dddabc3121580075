//! Core data types
//!
//! Conversation input handed to endpoints, model configuration, and the
//! uniform generation tokens every endpoint emits.

pub mod chat;
pub mod generation;
pub mod model;

pub use chat::*;
pub use generation::*;
pub use model::*;
