//! ATI langserve endpoint
//!
//! Streams from a langserve runnable bound to an upstream session cookie.
//! The body uses LF-delimited event blocks. When the conversation holds no
//! user message the whole conversation is rendered into a prompt and sent
//! with `user_id`/`session_id` set to `"-1"`.

mod endpoint;

pub use endpoint::AtiLangserveEndpoint;
