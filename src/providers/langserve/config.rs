//! Langserve endpoint configuration

use serde::{Deserialize, Serialize};

use crate::error::EndpointError;
use crate::types::ModelConfig;

fn default_weight() -> u32 {
    1
}

/// Configuration shared by the langserve endpoint variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangserveConfig {
    /// Base URL of the runnable; `/stream` is appended.
    pub url: String,
    /// Relative selection weight among the endpoints of one model.
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub model: ModelConfig,
}

impl LangserveConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            weight: default_weight(),
            model: ModelConfig::default(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EndpointError> {
        if self.weight == 0 {
            return Err(EndpointError::ConfigurationError(
                "Endpoint weight must be a positive integer".to_string(),
            ));
        }

        let url = reqwest::Url::parse(&self.url).map_err(|e| {
            EndpointError::ConfigurationError(format!("Invalid endpoint url {:?}: {e}", self.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::ConfigurationError(
                "Endpoint url must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }

    /// `{url}/stream`
    pub fn stream_url(&self) -> String {
        format!("{}/stream", self.url.trim_end_matches('/'))
    }
}
