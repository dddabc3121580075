//! Event interpretation
//!
//! Converts decoded [`EventRecord`]s into [`GenerationToken`]s while keeping
//! the running answer text and the retrieved context entries of one stream.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::decoder::EventRecord;
use crate::types::GenerationToken;

/// JSON carried by a `data` record.
///
/// Both fields are optional. A non-string `answer` or non-array `context`
/// is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataPayload {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub answer: String,
    #[serde(default, deserialize_with = "array_or_empty")]
    pub context: Vec<Value>,
}

impl DataPayload {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn array_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// Stateful record-to-token converter for one stream.
///
/// Emits one token per well-formed `data` record and exactly one terminal
/// token on `end`; after that every record is ignored. Malformed payloads are
/// logged and skipped without consuming a token id.
#[derive(Debug, Default)]
pub struct EventInterpreter {
    next_id: u32,
    generated_text: String,
    context: Vec<Value>,
    finished: bool,
}

impl EventInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpret(&mut self, record: EventRecord) -> Option<GenerationToken> {
        if self.finished {
            return None;
        }

        match record {
            EventRecord::Data(raw) => self.on_data(&raw),
            EventRecord::End => Some(self.on_end()),
            EventRecord::Unknown(raw) => {
                tracing::trace!(target: "langserve_endpoints::stream", payload = %raw, "ignoring non-data event");
                None
            }
        }
    }

    fn on_data(&mut self, raw: &str) -> Option<GenerationToken> {
        let payload = match DataPayload::parse(raw) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    target: "langserve_endpoints::stream",
                    error = %e,
                    payload = %raw,
                    "Failed to parse JSON payload, skipping record"
                );
                return None;
            }
        };

        self.generated_text.push_str(&payload.answer);
        if !payload.context.is_empty() {
            self.context.extend(payload.context);
        }

        let id = self.take_id();
        Some(GenerationToken::delta(id, payload.answer))
    }

    fn on_end(&mut self) -> GenerationToken {
        self.finished = true;
        tracing::debug!(
            target: "langserve_endpoints::stream",
            tokens = self.next_id,
            context_entries = self.context.len(),
            "end event received"
        );
        self.context.clear();

        let id = self.take_id();
        GenerationToken::terminal(id, self.generated_text.clone())
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Answer text accumulated so far.
    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    /// Context entries accumulated so far; cleared once the stream ends.
    pub fn context(&self) -> &[Value] {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
