//! ATI langserve endpoint implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};

use crate::error::EndpointError;
use crate::prompt::{DefaultPromptBuilder, PromptBuilder};
use crate::providers::langserve::LangserveConfig;
use crate::providers::request::{StreamRequestBody, send_stream_request};
use crate::streaming::{StreamContext, StreamDialect, StreamFactory, TokenStream};
use crate::traits::Endpoint;
use crate::types::EndpointParameters;

/// Ids sent when the request carries a rendered prompt instead of a user message.
const ANONYMOUS_ID: &str = "-1";

/// Endpoint for cookie-bound langserve runnables speaking the LF dialect.
#[derive(Clone)]
pub struct AtiLangserveEndpoint {
    config: LangserveConfig,
    http_client: reqwest::Client,
    cookie: HeaderValue,
    prompt_builder: Arc<dyn PromptBuilder>,
}

impl std::fmt::Debug for AtiLangserveEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtiLangserveEndpoint")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AtiLangserveEndpoint {
    /// Create the endpoint. `model.config.configurable.cookie` is required.
    pub fn new(config: LangserveConfig, http_client: reqwest::Client) -> Result<Self, EndpointError> {
        config.validate()?;

        let cookie = config.model.configurable().cookie.as_deref().ok_or_else(|| {
            EndpointError::ConfigurationError(
                "atilangserve endpoints require model.config.configurable.cookie".to_string(),
            )
        })?;
        let mut cookie = HeaderValue::from_str(cookie).map_err(|e| {
            EndpointError::ConfigurationError(format!("Invalid cookie header value: {e}"))
        })?;
        cookie.set_sensitive(true);

        Ok(Self {
            config,
            http_client,
            cookie,
            prompt_builder: Arc::new(DefaultPromptBuilder::default()),
        })
    }

    /// Replace the prompt renderer used when no user message exists.
    pub fn with_prompt_builder(mut self, prompt_builder: Arc<dyn PromptBuilder>) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    pub fn config(&self) -> &LangserveConfig {
        &self.config
    }

    fn request_body(&self, params: &EndpointParameters) -> Result<StreamRequestBody, EndpointError> {
        let configurable = self.config.model.configurable();
        match params.last_user_message() {
            Some(message) => Ok(StreamRequestBody::new(
                message.content.clone(),
                configurable.user_id.clone(),
                configurable.session_id.clone(),
            )),
            None => {
                let prompt = self.prompt_builder.build_prompt(params, &self.config.model)?;
                Ok(StreamRequestBody::new(
                    prompt,
                    Some(ANONYMOUS_ID.to_string()),
                    Some(ANONYMOUS_ID.to_string()),
                ))
            }
        }
    }
}

#[async_trait]
impl Endpoint for AtiLangserveEndpoint {
    fn name(&self) -> &'static str {
        "atilangserve"
    }

    async fn generate(&self, params: EndpointParameters) -> Result<TokenStream, EndpointError> {
        let body = self.request_body(&params)?;

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, self.cookie.clone());

        let ctx = StreamContext::new(self.name());
        let response = send_stream_request(
            &self.http_client,
            &self.config.stream_url(),
            &body,
            headers,
            &ctx,
        )
        .await?;

        Ok(StreamFactory::create_token_stream(
            response,
            StreamDialect::LfDelimited,
            ctx,
        ))
    }
}
