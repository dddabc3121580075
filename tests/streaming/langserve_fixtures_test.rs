//! Langserve streaming fixtures tests

use langserve_endpoints::streaming::StreamDialect;
use serde_json::json;

#[path = "../support/stream_fixture.rs"]
mod support;

#[tokio::test]
async fn lf_answer_with_context_fixture() {
    let dialect = StreamDialect::LfDelimited;
    let body = support::load_fixture("ati_answer_with_context.txt", dialect).expect("load fixture");
    let tokens = support::collect_tokens(support::chunks_per_block(&body, dialect), dialect).await;

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Hel", "lo, ", "wörld 👋", ""]);

    let last = tokens.last().expect("terminal token");
    assert!(last.is_final());
    assert!(last.special);
    assert_eq!(last.generated_text.as_deref(), Some("Hello, wörld 👋"));
    assert!(tokens.iter().all(|t| t.logprob == 0.0));
}

#[tokio::test]
async fn crlf_answer_fixture() {
    let dialect = StreamDialect::CrlfDelimited;
    let body = support::load_fixture("langserve_answer.txt", dialect).expect("load fixture");
    assert!(body.contains("\r\n"));
    let tokens = support::collect_tokens(support::chunks_per_block(&body, dialect), dialect).await;

    assert_eq!(tokens.len(), 4);
    assert_eq!(support::delta_text(&tokens), "The answer is 42.");
    assert_eq!(
        tokens[3].generated_text.as_deref(),
        Some("The answer is 42.")
    );
}

#[tokio::test]
async fn crlf_body_in_a_single_chunk() {
    let dialect = StreamDialect::CrlfDelimited;
    let body = support::load_fixture("langserve_answer.txt", dialect).expect("load fixture");
    let tokens = support::collect_tokens(vec![Ok(body.into_bytes())], dialect).await;

    let ids: Vec<u32> = tokens.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(tokens[3].is_final());
}

#[tokio::test]
async fn malformed_payload_is_skipped() {
    for dialect in [StreamDialect::LfDelimited, StreamDialect::CrlfDelimited] {
        let body = support::load_fixture("malformed_payload.txt", dialect).expect("load fixture");
        let tokens =
            support::collect_tokens(support::chunks_per_block(&body, dialect), dialect).await;

        assert_eq!(tokens.len(), 3, "{dialect:?}");
        assert_eq!(tokens[0].text, "a");
        assert_eq!((tokens[1].id, tokens[1].text.as_str()), (1, "b"));
        assert_eq!(tokens[2].generated_text.as_deref(), Some("ab"));
    }
}

#[tokio::test]
async fn nothing_after_end_is_emitted() {
    let dialect = StreamDialect::LfDelimited;
    let body = format!(
        "event: data\ndata: {}\n\nevent: end\n\nevent: data\ndata: {}\n\n",
        json!({"answer": "kept"}),
        json!({"answer": "dropped"})
    );
    let tokens = support::collect_tokens(vec![Ok(body.into_bytes())], dialect).await;

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].generated_text.as_deref(), Some("kept"));
    assert_eq!(tokens.iter().filter(|t| t.is_final()).count(), 1);
}
