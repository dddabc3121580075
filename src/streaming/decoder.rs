//! Wire dialect decoders
//!
//! Langserve-style endpoints stream repeating blocks of
//!
//! ```text
//! event: data
//! data: {"answer": "...", "context": [...]}
//! ```
//!
//! terminated by an `event: end` block. Two dialects are in use upstream:
//!
//! - [`LfDelimitedDecoder`]: `\n` separated lines, buffered across chunks.
//!   A `data:` line belongs to the most recent `event:` line.
//! - [`CrlfDelimitedDecoder`]: `\r\n` separated segments; an `event: data`
//!   segment must be immediately followed by its `data: ` segment.
//!
//! Both turn text chunks (which need not align with line or event
//! boundaries) into [`EventRecord`]s. Payloads are passed through raw; JSON
//! interpretation happens in [`EventInterpreter`](super::EventInterpreter).

const EVENT_PREFIX: &str = "event:";
const EVENT_DATA: &str = "event: data";
const EVENT_END: &str = "event: end";
const DATA_PREFIX: &str = "data: ";

/// Kind of an [`EventRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Data,
    End,
    Unknown,
}

/// One logical unit recovered from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    /// Payload of a `data:` line announced by `event: data`, prefix stripped.
    Data(String),
    /// `event: end`. No payload is required or read.
    End,
    /// Payload of a `data:` line that belongs to some other event type
    /// (e.g. langserve's `metadata`).
    Unknown(String),
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Data(_) => EventKind::Data,
            Self::End => EventKind::End,
            Self::Unknown(_) => EventKind::Unknown,
        }
    }
}

/// Incremental decoder for one response body.
///
/// A decoder instance owns its buffer for the lifetime of one stream and is
/// never shared. Once `End` has been returned the decoder is terminated and
/// ignores further input.
pub trait StreamDialectDecoder: Send {
    /// Feed the next decoded text chunk and return every record it completes.
    fn feed(&mut self, chunk: &str) -> Vec<EventRecord>;

    /// Flush buffered input when the body ends.
    fn finish(&mut self) -> Vec<EventRecord>;

    /// Whether an `End` record has been produced.
    fn is_terminated(&self) -> bool;
}

/// Selects the decoder strategy for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDialect {
    /// `\n` delimited, buffered across chunks.
    LfDelimited,
    /// `\r\n` delimited, event marker and data as adjacent segments.
    CrlfDelimited,
}

impl StreamDialect {
    pub fn decoder(self) -> Box<dyn StreamDialectDecoder> {
        match self {
            Self::LfDelimited => Box::new(LfDelimitedDecoder::new()),
            Self::CrlfDelimited => Box::new(CrlfDelimitedDecoder::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LfDelimited => "lf",
            Self::CrlfDelimited => "crlf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CurrentEvent {
    /// No `event:` line seen yet.
    Unset,
    Data,
    Other(String),
}

/// Dialect A: newline-delimited lines held in a persistent buffer.
#[derive(Debug)]
pub struct LfDelimitedDecoder {
    buffer: String,
    current_event: CurrentEvent,
    terminated: bool,
}

impl Default for LfDelimitedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LfDelimitedDecoder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            current_event: CurrentEvent::Unset,
            terminated: false,
        }
    }

    /// Bytes currently held back waiting for a newline.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    fn classify_line(&mut self, line: &str) -> Option<EventRecord> {
        if line.starts_with(EVENT_END) {
            self.terminated = true;
            return Some(EventRecord::End);
        }
        if line.starts_with(EVENT_DATA) {
            self.current_event = CurrentEvent::Data;
            return None;
        }
        if let Some(name) = line.strip_prefix(EVENT_PREFIX) {
            self.current_event = CurrentEvent::Other(name.trim().to_string());
            return None;
        }

        let payload = line.strip_prefix(DATA_PREFIX)?;
        match self.current_event {
            CurrentEvent::Unset | CurrentEvent::Data => Some(EventRecord::Data(payload.to_string())),
            CurrentEvent::Other(_) => Some(EventRecord::Unknown(payload.to_string())),
        }
    }
}

impl StreamDialectDecoder for LfDelimitedDecoder {
    fn feed(&mut self, chunk: &str) -> Vec<EventRecord> {
        let mut records = Vec::new();
        if self.terminated {
            return records;
        }

        self.buffer.push_str(chunk);
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            if let Some(record) = self.classify_line(line.trim()) {
                records.push(record);
                if self.terminated {
                    self.buffer.clear();
                    break;
                }
            }
        }
        records
    }

    fn finish(&mut self) -> Vec<EventRecord> {
        if self.terminated {
            return Vec::new();
        }
        let rest = std::mem::take(&mut self.buffer);
        self.classify_line(rest.trim()).into_iter().collect()
    }

    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Dialect B: CRLF-delimited segments scanned per chunk.
///
/// Upstream flushes whole records per chunk, often without a trailing
/// delimiter. The last segment of a chunk is therefore released as soon as it
/// reads as complete: an `event: data` or `event: end` marker, or a `data: `
/// segment whose payload is a whole JSON object. Anything else stays open
/// until its `\r\n` arrives, or until the next chunk starts a new segment
/// (`event:` or `data: `), which closes it.
#[derive(Debug, Default)]
pub struct CrlfDelimitedDecoder {
    /// Text of the last segment, still waiting for its `\r\n`.
    open: String,
    /// `open` was already classified; its remainder is skipped.
    open_released: bool,
    awaiting_data: bool,
    terminated: bool,
}

fn starts_segment(chunk: &str) -> bool {
    chunk.starts_with(EVENT_PREFIX) || chunk.starts_with(DATA_PREFIX)
}

fn is_json_object(payload: &str) -> bool {
    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(payload).is_ok()
}

impl CrlfDelimitedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_segment(&mut self, segment: &str) -> Option<EventRecord> {
        let awaiting_data = std::mem::take(&mut self.awaiting_data);

        if segment.starts_with(EVENT_END) {
            return Some(EventRecord::End);
        }
        if segment.starts_with(EVENT_DATA) {
            self.awaiting_data = true;
            return None;
        }

        let payload = segment.strip_prefix(DATA_PREFIX)?;
        if awaiting_data {
            Some(EventRecord::Data(payload.to_string()))
        } else {
            Some(EventRecord::Unknown(payload.to_string()))
        }
    }

    /// Classify one segment into `records`. Returns `true` once `End` is seen.
    fn push_segment(&mut self, segment: &str, records: &mut Vec<EventRecord>) -> bool {
        match self.scan_segment(segment) {
            Some(EventRecord::End) => {
                self.terminated = true;
                self.open.clear();
                self.open_released = false;
                records.push(EventRecord::End);
                true
            }
            Some(record) => {
                records.push(record);
                false
            }
            None => false,
        }
    }

    fn release_open(&mut self, records: &mut Vec<EventRecord>) {
        if self.open_released || self.open.ends_with('\r') {
            return;
        }
        let complete = self.open.starts_with(EVENT_END)
            || self.open.starts_with(EVENT_DATA)
            || self.open.strip_prefix(DATA_PREFIX).is_some_and(is_json_object);
        if !complete {
            return;
        }

        let open = self.open.clone();
        self.open_released = true;
        self.push_segment(&open, records);
    }
}

impl StreamDialectDecoder for CrlfDelimitedDecoder {
    fn feed(&mut self, chunk: &str) -> Vec<EventRecord> {
        let mut records = Vec::new();
        if self.terminated {
            return records;
        }

        if !self.open.is_empty() && starts_segment(chunk) {
            let open = std::mem::take(&mut self.open);
            if !std::mem::take(&mut self.open_released) && self.push_segment(&open, &mut records) {
                return records;
            }
        }

        self.open.push_str(chunk);
        if let Some(last) = self.open.rfind("\r\n") {
            let complete: String = self.open.drain(..last + 2).collect();
            let skip = usize::from(std::mem::take(&mut self.open_released));
            for segment in complete.split_terminator("\r\n").skip(skip) {
                if self.push_segment(segment, &mut records) {
                    return records;
                }
            }
        }

        self.release_open(&mut records);
        records
    }

    fn finish(&mut self) -> Vec<EventRecord> {
        let mut records = Vec::new();
        if self.terminated {
            return records;
        }
        let open = std::mem::take(&mut self.open);
        if !std::mem::take(&mut self.open_released) && !open.is_empty() {
            self.push_segment(&open, &mut records);
        }
        records
    }

    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
