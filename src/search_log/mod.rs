//! Search-index logging sink
//!
//! Records chat messages and feedback scores in an external search index.
//! Every operation is best effort: failures are logged under the
//! `langserve_endpoints::search_log` target and never reach the caller, so
//! chat keeps working while the index is unavailable.

mod config;
mod elasticsearch;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EndpointError;

pub use config::SearchLogConfig;
pub use elasticsearch::ElasticsearchLog;

/// Best-effort sink for chat messages and their feedback scores.
#[async_trait]
pub trait ChatLogSink: Send + Sync {
    /// Index one message with a neutral score.
    async fn save(&self, user_id: &str, conversation_id: &str, message_id: &str, message: &str);

    /// Remove every document of a conversation.
    async fn delete_by_conversation(&self, conversation_id: &str);

    /// Set the feedback score of one message.
    async fn update_score(&self, conversation_id: &str, message_id: &str, score: i8);
}

/// Sink used when search logging is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLog;

#[async_trait]
impl ChatLogSink for DisabledLog {
    async fn save(&self, _: &str, _: &str, _: &str, _: &str) {}

    async fn delete_by_conversation(&self, _: &str) {}

    async fn update_score(&self, _: &str, _: &str, _: i8) {}
}

/// Build the sink described by `config`.
pub fn build_search_log(
    config: SearchLogConfig,
    http_client: reqwest::Client,
) -> Result<Arc<dyn ChatLogSink>, EndpointError> {
    if !config.enabled {
        tracing::debug!(target: "langserve_endpoints::search_log", "search logging disabled");
        return Ok(Arc::new(DisabledLog));
    }
    Ok(Arc::new(ElasticsearchLog::new(config, http_client)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_config_builds_noop_sink() {
        let sink = build_search_log(SearchLogConfig::default(), reqwest::Client::new()).unwrap();
        sink.save("u", "c", "m", "hello").await;
        sink.update_score("c", "m", 1).await;
        sink.delete_by_conversation("c").await;
    }

    #[test]
    fn enabled_config_without_host_is_rejected() {
        let config = SearchLogConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(matches!(
            build_search_log(config, reqwest::Client::new()),
            Err(EndpointError::ConfigurationError(_))
        ));
    }
}
