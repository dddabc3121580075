//! Test fixtures utilities: load langserve stream bodies and drive the token stream

#![allow(dead_code)]

use futures_util::StreamExt;
use langserve_endpoints::streaming::{StreamContext, StreamDialect, StreamFactory};
use langserve_endpoints::{EndpointError, GenerationToken};
use std::io;
use std::path::{Path, PathBuf};

pub type ByteChunks = Vec<Result<Vec<u8>, io::Error>>;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("langserve")
}

/// Load a fixture body. Fixtures are stored with LF line endings; the CRLF
/// dialect gets them converted.
pub fn load_fixture(name: &str, dialect: StreamDialect) -> io::Result<String> {
    let raw = std::fs::read_to_string(fixtures_dir().join(name))?;
    let normalized = raw.replace("\r\n", "\n");
    Ok(match dialect {
        StreamDialect::LfDelimited => normalized,
        StreamDialect::CrlfDelimited => normalized.replace('\n', "\r\n"),
    })
}

/// Split a body into one chunk per event block, the way upstream flushes it.
pub fn chunks_per_block(body: &str, dialect: StreamDialect) -> ByteChunks {
    let separator = match dialect {
        StreamDialect::LfDelimited => "\n\n",
        StreamDialect::CrlfDelimited => "\r\n\r\n",
    };
    body.split_inclusive(separator)
        .map(|block| Ok(block.as_bytes().to_vec()))
        .collect()
}

/// Split a body into chunks of `size` bytes, ignoring line and UTF-8 boundaries.
pub fn chunks_of(body: &str, size: usize) -> ByteChunks {
    body.as_bytes()
        .chunks(size)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect()
}

/// Run chunks through the token stream and collect every item.
pub async fn collect_items(
    chunks: ByteChunks,
    dialect: StreamDialect,
) -> Vec<Result<GenerationToken, EndpointError>> {
    let stream = StreamFactory::create_token_stream_from_bytes(
        futures_util::stream::iter(chunks),
        dialect,
        StreamContext::new("fixture"),
    );
    stream.collect().await
}

/// Like [`collect_items`] but fails on the first error.
pub async fn collect_tokens(chunks: ByteChunks, dialect: StreamDialect) -> Vec<GenerationToken> {
    collect_items(chunks, dialect)
        .await
        .into_iter()
        .map(|item| item.expect("token"))
        .collect()
}

/// Concatenated text of all non-final tokens.
pub fn delta_text(tokens: &[GenerationToken]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_final())
        .map(|t| t.text.as_str())
        .collect()
}
