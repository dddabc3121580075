//! Utility modules

pub mod cancel;

pub use cancel::{CancelHandle, make_cancellable_stream, make_stream_handle};
