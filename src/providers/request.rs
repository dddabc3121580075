//! Stream request glue shared by the langserve endpoints
//!
//! Both endpoints POST `{url}/stream` with
//! `{"input": ..., "config": {"configurable": {"user_id": ..., "session_id": ...}}}`
//! and treat any non-success status as fatal.

use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::error::EndpointError;
use crate::streaming::StreamContext;

/// Body of a langserve `/stream` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamRequestBody {
    pub input: String,
    pub config: RunnableConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnableConfig {
    pub configurable: RunnableConfigurable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnableConfigurable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl StreamRequestBody {
    pub fn new(
        input: impl Into<String>,
        user_id: Option<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            input: input.into(),
            config: RunnableConfig {
                configurable: RunnableConfigurable {
                    user_id,
                    session_id,
                },
            },
        }
    }
}

/// Send one streaming request and return the response once its status is accepted.
///
/// No retry: a non-success status fails with the raw response body as detail.
pub async fn send_stream_request(
    http_client: &reqwest::Client,
    url: &str,
    body: &StreamRequestBody,
    headers: HeaderMap,
    ctx: &StreamContext,
) -> Result<reqwest::Response, EndpointError> {
    tracing::debug!(
        target: "langserve_endpoints::http",
        endpoint = %ctx.endpoint,
        request_id = %ctx.request_id,
        url = %url,
        "sending stream request"
    );

    let response = http_client
        .post(url)
        .headers(headers)
        .json(body)
        .send()
        .await
        .map_err(|e| EndpointError::HttpError(format!("Failed to send request: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::warn!(
            target: "langserve_endpoints::http",
            endpoint = %ctx.endpoint,
            request_id = %ctx.request_id,
            status = status.as_u16(),
            "upstream rejected stream request"
        );
        return Err(EndpointError::api_error(status.as_u16(), error_text));
    }

    Ok(response)
}
