//! Streaming Module
//!
//! Turns a langserve-style response body into a uniform token stream:
//! - UTF-8 safe chunk decoding
//! - Line/segment decoders for the two upstream wire dialects
//! - Event interpretation (answer/context accumulation, terminal token)
//! - Stream factory and caller-side accumulation

mod decoder;
mod factory;
mod interpreter;
mod processor;
mod types;
mod utf8;

pub use decoder::*;
pub use factory::*;
pub use interpreter::*;
pub use processor::*;
pub use types::*;
pub use utf8::Utf8StreamDecoder;
