//! Langserve endpoint implementation

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use super::config::LangserveConfig;
use crate::error::EndpointError;
use crate::providers::request::{StreamRequestBody, send_stream_request};
use crate::streaming::{StreamContext, StreamDialect, StreamFactory, TokenStream};
use crate::traits::Endpoint;
use crate::types::EndpointParameters;

/// Endpoint for langserve runnables speaking the CRLF dialect.
#[derive(Debug, Clone)]
pub struct LangserveEndpoint {
    config: LangserveConfig,
    http_client: reqwest::Client,
}

impl LangserveEndpoint {
    pub fn new(config: LangserveConfig, http_client: reqwest::Client) -> Result<Self, EndpointError> {
        config.validate()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &LangserveConfig {
        &self.config
    }
}

#[async_trait]
impl Endpoint for LangserveEndpoint {
    fn name(&self) -> &'static str {
        "langserve"
    }

    async fn generate(&self, params: EndpointParameters) -> Result<TokenStream, EndpointError> {
        let Some(last_user) = params.last_user_message() else {
            tracing::debug!(
                target: "langserve_endpoints::http",
                endpoint = self.name(),
                "no user message in conversation, nothing to send"
            );
            return Ok(Box::pin(futures::stream::empty()));
        };

        let configurable = self.config.model.configurable();
        let body = StreamRequestBody::new(
            last_user.content.clone(),
            configurable.user_id.clone(),
            configurable.session_id.clone(),
        );

        let ctx = StreamContext::new(self.name());
        let response = send_stream_request(
            &self.http_client,
            &self.config.stream_url(),
            &body,
            HeaderMap::new(),
            &ctx,
        )
        .await?;

        Ok(StreamFactory::create_token_stream(
            response,
            StreamDialect::CrlfDelimited,
            ctx,
        ))
    }
}
