//! Endpoint registry
//!
//! Configuration-driven construction of endpoints. Each model definition
//! lists endpoint entries tagged by `type`:
//!
//! ```json
//! {"type": "langserve", "url": "http://localhost:8000/chat", "weight": 1}
//! {"type": "atilangserve", "url": "http://localhost:8000/ati",
//!  "model": {"name": "ati", "config": {"configurable": {"cookie": "sid=..."}}}}
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EndpointError;
use crate::prompt::PromptBuilder;
use crate::providers::{AtiLangserveEndpoint, LangserveConfig, LangserveEndpoint};
use crate::traits::Endpoint;

/// One configured endpoint entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EndpointConfig {
    #[serde(rename = "langserve")]
    Langserve(LangserveConfig),
    #[serde(rename = "atilangserve")]
    AtiLangserve(LangserveConfig),
}

impl EndpointConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Langserve(_) => "langserve",
            Self::AtiLangserve(_) => "atilangserve",
        }
    }

    pub fn langserve_config(&self) -> &LangserveConfig {
        match self {
            Self::Langserve(config) | Self::AtiLangserve(config) => config,
        }
    }

    pub fn weight(&self) -> u32 {
        self.langserve_config().weight
    }

    pub fn validate(&self) -> Result<(), EndpointError> {
        self.langserve_config().validate()
    }
}

/// Build an endpoint from its configuration, sharing `http_client` across endpoints.
pub fn build_endpoint(
    config: EndpointConfig,
    http_client: reqwest::Client,
) -> Result<Arc<dyn Endpoint>, EndpointError> {
    build_endpoint_with_prompt_builder(config, http_client, None)
}

/// Like [`build_endpoint`], overriding the prompt renderer of endpoints that use one.
pub fn build_endpoint_with_prompt_builder(
    config: EndpointConfig,
    http_client: reqwest::Client,
    prompt_builder: Option<Arc<dyn PromptBuilder>>,
) -> Result<Arc<dyn Endpoint>, EndpointError> {
    tracing::debug!(
        target: "langserve_endpoints::http",
        kind = config.kind(),
        url = %config.langserve_config().url,
        "building endpoint"
    );

    match config {
        EndpointConfig::Langserve(config) => {
            Ok(Arc::new(LangserveEndpoint::new(config, http_client)?))
        }
        EndpointConfig::AtiLangserve(config) => {
            let mut endpoint = AtiLangserveEndpoint::new(config, http_client)?;
            if let Some(builder) = prompt_builder {
                endpoint = endpoint.with_prompt_builder(builder);
            }
            Ok(Arc::new(endpoint))
        }
    }
}
