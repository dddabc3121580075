//! ATI langserve endpoint (LF dialect, cookie-bound) against a mock upstream

use futures_util::StreamExt;
use langserve_endpoints::prelude::*;
use langserve_endpoints::streaming::StreamDialect;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "support/stream_fixture.rs"]
mod support;

fn ati_config(server: &MockServer) -> LangserveConfig {
    LangserveConfig::new(format!("{}/ati", server.uri())).with_model(
        ModelConfig::new("ati")
            .with_user_id("u1")
            .with_session_id("s1")
            .with_cookie("session=abc123"),
    )
}

async fn mount_fixture(server: &MockServer, expected_body: serde_json::Value) {
    let body =
        support::load_fixture("ati_answer_with_context.txt", StreamDialect::LfDelimited).unwrap();
    Mock::given(method("POST"))
        .and(path("/ati/stream"))
        .and(header("cookie", "session=abc123"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sends_cookie_and_last_user_message() {
    let server = MockServer::start().await;
    mount_fixture(
        &server,
        json!({
            "input": "tell me",
            "config": {"configurable": {"user_id": "u1", "session_id": "s1"}}
        }),
    )
    .await;

    let endpoint = AtiLangserveEndpoint::new(ati_config(&server), reqwest::Client::new()).unwrap();
    let params = EndpointParameters::new(vec![ChatMessage::user("m1", "tell me")]);
    let message = collect_generation(endpoint.generate(params).await.unwrap())
        .await
        .unwrap();

    assert!(message.completed);
    assert_eq!(message.text, "Hello, wörld 👋");
    assert_eq!(message.token_count, 3);
}

#[tokio::test]
async fn falls_back_to_rendered_prompt_with_anonymous_ids() {
    let server = MockServer::start().await;
    mount_fixture(
        &server,
        json!({
            "input": "Be brief.\n\nAssistant: Welcome!\nAssistant:",
            "config": {"configurable": {"user_id": "-1", "session_id": "-1"}}
        }),
    )
    .await;

    let endpoint = AtiLangserveEndpoint::new(ati_config(&server), reqwest::Client::new()).unwrap();
    let params = EndpointParameters::new(vec![ChatMessage::assistant("m1", "Welcome!")])
        .with_preprompt("Be brief.");
    let tokens: Vec<_> = endpoint.generate(params).await.unwrap().collect().await;
    assert_eq!(tokens.len(), 4);
}

struct FixedPrompt;

impl PromptBuilder for FixedPrompt {
    fn build_prompt(
        &self,
        params: &EndpointParameters,
        model: &ModelConfig,
    ) -> Result<String, EndpointError> {
        Ok(format!("[{}] {} messages", model.name, params.messages.len()))
    }
}

#[tokio::test]
async fn custom_prompt_builder_is_used() {
    let server = MockServer::start().await;
    mount_fixture(
        &server,
        json!({
            "input": "[ati] 0 messages",
            "config": {"configurable": {"user_id": "-1", "session_id": "-1"}}
        }),
    )
    .await;

    let endpoint = AtiLangserveEndpoint::new(ati_config(&server), reqwest::Client::new())
        .unwrap()
        .with_prompt_builder(Arc::new(FixedPrompt));
    let stream = endpoint.generate(EndpointParameters::new(vec![])).await.unwrap();
    let message = collect_generation(stream).await.unwrap();
    assert!(message.completed);
}

#[tokio::test]
async fn upstream_rejection_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ati/stream"))
        .respond_with(ResponseTemplate::new(401).set_body_string("cookie expired"))
        .mount(&server)
        .await;

    let endpoint = AtiLangserveEndpoint::new(ati_config(&server), reqwest::Client::new()).unwrap();
    let params = EndpointParameters::new(vec![ChatMessage::user("m1", "hi")]);
    let Err(err) = endpoint.generate(params).await else {
        panic!("expected upstream status to fail the request");
    };
    assert!(matches!(
        err,
        EndpointError::ApiError { code: 401, ref message } if message == "cookie expired"
    ));
}
