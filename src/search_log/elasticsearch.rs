//! Elasticsearch implementation of [`ChatLogSink`]

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::json;

use super::{ChatLogSink, SearchLogConfig};
use crate::error::EndpointError;

/// Document indexed for every saved message.
#[derive(Debug, Clone, Serialize)]
struct ChatLogDocument<'a> {
    message_id: &'a str,
    created_at: String,
    user_id: &'a str,
    session_id: &'a str,
    message: &'a str,
    hf_score: i8,
}

/// Logs chat messages into an Elasticsearch index over its REST API.
#[derive(Debug, Clone)]
pub struct ElasticsearchLog {
    config: SearchLogConfig,
    index_url: String,
    http_client: reqwest::Client,
}

impl ElasticsearchLog {
    pub fn new(config: SearchLogConfig, http_client: reqwest::Client) -> Result<Self, EndpointError> {
        config.validate()?;
        let index_url = format!(
            "{}/{}",
            config.base_url(),
            urlencoding::encode(&config.index)
        );
        Ok(Self {
            config,
            index_url,
            http_client,
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<(), EndpointError> {
        let url = format!("{}/{path}", self.index_url);
        let mut request = self.http_client.post(&url).json(&body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(
                username,
                self.config.password.as_ref().map(|p| p.expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EndpointError::api_error(status.as_u16(), text));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatLogSink for ElasticsearchLog {
    async fn save(&self, user_id: &str, conversation_id: &str, message_id: &str, message: &str) {
        let document = ChatLogDocument {
            message_id,
            created_at: Utc::now().to_rfc3339(),
            user_id,
            session_id: conversation_id,
            message,
            hf_score: 0,
        };
        let body = match serde_json::to_value(&document) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(target: "langserve_endpoints::search_log", error = %e, "failed to encode chat log document");
                return;
            }
        };

        if let Err(e) = self.post("_doc?refresh=true", body).await {
            tracing::error!(
                target: "langserve_endpoints::search_log",
                operation = "save",
                conversation_id,
                message_id,
                error = %e,
                "Error saving chat log"
            );
        }
    }

    async fn delete_by_conversation(&self, conversation_id: &str) {
        let body = json!({
            "query": { "term": { "session_id": conversation_id } }
        });
        if let Err(e) = self.post("_delete_by_query?refresh=true", body).await {
            tracing::error!(
                target: "langserve_endpoints::search_log",
                operation = "delete_by_conversation",
                conversation_id,
                error = %e,
                "Error deleting chat logs"
            );
        }
    }

    async fn update_score(&self, conversation_id: &str, message_id: &str, score: i8) {
        let body = json!({
            "script": {
                "source": "ctx._source.hf_score = params.score",
                "lang": "painless",
                "params": { "score": score }
            },
            "query": {
                "bool": {
                    "must": [
                        { "match": { "message_id": message_id } },
                        { "match": { "session_id": conversation_id } }
                    ]
                }
            }
        });
        if let Err(e) = self.post("_update_by_query", body).await {
            tracing::error!(
                target: "langserve_endpoints::search_log",
                operation = "update_score",
                conversation_id,
                message_id,
                error = %e,
                "Error updating chat log score"
            );
        }
    }
}
