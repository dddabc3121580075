//! The token sequence must not depend on how the body is split into chunks.

use langserve_endpoints::GenerationToken;
use langserve_endpoints::streaming::StreamDialect;

#[path = "../support/stream_fixture.rs"]
mod support;

fn assert_sequence_invariants(tokens: &[GenerationToken]) {
    for (expected, token) in tokens.iter().enumerate() {
        assert_eq!(token.id as usize, expected, "ids increase by one from 0");
    }
    let finals: Vec<&GenerationToken> = tokens.iter().filter(|t| t.is_final()).collect();
    assert!(finals.len() <= 1, "at most one terminal token");
    if let Some(last) = finals.first() {
        assert_eq!(
            last.generated_text.as_deref(),
            Some(support::delta_text(tokens).as_str())
        );
        assert!(tokens.last().is_some_and(|t| t.is_final()), "terminal token is last");
    }
}

async fn check_fixture(name: &str, dialect: StreamDialect) {
    let body = support::load_fixture(name, dialect).expect("load fixture");
    let reference =
        support::collect_tokens(support::chunks_per_block(&body, dialect), dialect).await;
    assert_sequence_invariants(&reference);

    for size in 1..=body.len() {
        let tokens = support::collect_tokens(support::chunks_of(&body, size), dialect).await;
        assert_eq!(tokens, reference, "{name} {dialect:?} split every {size} bytes");
    }
}

#[tokio::test]
async fn lf_dialect_is_chunking_invariant() {
    for name in [
        "ati_answer_with_context.txt",
        "malformed_payload.txt",
        "no_end_event.txt",
    ] {
        check_fixture(name, StreamDialect::LfDelimited).await;
    }
}

#[tokio::test]
async fn crlf_dialect_is_chunking_invariant() {
    for name in [
        "langserve_answer.txt",
        "ati_answer_with_context.txt",
        "malformed_payload.txt",
        "no_end_event.txt",
    ] {
        check_fixture(name, StreamDialect::CrlfDelimited).await;
    }
}
