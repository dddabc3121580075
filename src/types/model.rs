//! Model configuration
//!
//! Mirrors the per-model `config.configurable` block the chat application
//! stores alongside each model definition.

use serde::{Deserialize, Serialize};

/// Values forwarded to the upstream runnable as `config.configurable`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configurable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Upstream session cookie, sent as a `Cookie` header by cookie-bound endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRuntimeConfig {
    #[serde(default)]
    pub configurable: Configurable,
}

/// A model as seen by an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    #[serde(default)]
    pub config: ModelRuntimeConfig,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ModelRuntimeConfig::default(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.config.configurable.user_id = Some(user_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.config.configurable.session_id = Some(session_id.into());
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.config.configurable.cookie = Some(cookie.into());
        self
    }

    pub fn configurable(&self) -> &Configurable {
        &self.config.configurable
    }
}
