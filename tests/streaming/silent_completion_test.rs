//! Bodies that end without an `end` event, or fail mid-way

use langserve_endpoints::EndpointError;
use langserve_endpoints::streaming::{StreamDialect, collect_generation};
use langserve_endpoints::streaming::{StreamContext, StreamFactory};

#[path = "../support/stream_fixture.rs"]
mod support;

#[tokio::test]
async fn missing_end_event_completes_silently() {
    for dialect in [StreamDialect::LfDelimited, StreamDialect::CrlfDelimited] {
        let body = support::load_fixture("no_end_event.txt", dialect).expect("load fixture");
        let tokens =
            support::collect_tokens(support::chunks_per_block(&body, dialect), dialect).await;

        assert_eq!(tokens.len(), 2, "{dialect:?}");
        assert!(tokens.iter().all(|t| !t.is_final()));
        assert_eq!(support::delta_text(&tokens), "partial answer");
    }
}

#[tokio::test]
async fn end_event_without_trailing_newline_is_recognized() {
    let dialect = StreamDialect::LfDelimited;
    let body = "event: data\ndata: {\"answer\": \"x\"}\nevent: end";
    let tokens = support::collect_tokens(vec![Ok(body.as_bytes().to_vec())], dialect).await;
    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].is_final());
}

#[tokio::test]
async fn collect_generation_reports_incomplete_stream() {
    let dialect = StreamDialect::LfDelimited;
    let body = support::load_fixture("no_end_event.txt", dialect).expect("load fixture");
    let stream = StreamFactory::create_token_stream_from_bytes(
        futures_util::stream::iter(support::chunks_per_block(&body, dialect)),
        dialect,
        StreamContext::new("fixture"),
    );

    let message = tokio_test::assert_ok!(collect_generation(stream).await);
    assert_eq!(message.text, "partial answer");
    assert_eq!(message.token_count, 2);
    assert!(!message.completed);
}

#[tokio::test]
async fn read_error_ends_stream_after_partial_tokens() {
    let dialect = StreamDialect::LfDelimited;
    let chunks = vec![
        Ok(b"event: data\ndata: {\"answer\": \"a\"}\n\n".to_vec()),
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        )),
        Ok(b"event: end\n\n".to_vec()),
    ];
    let items = support::collect_items(chunks, dialect).await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|t| t.text.as_str()).ok(), Some("a"));
    assert!(matches!(items[1], Err(EndpointError::StreamError(_))));
}
