//! Incremental `text/event-stream` decoder.

use tracing::warn;

/// Longest line kept; longer lines are discarded along with their frame.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Largest `data` payload kept for one frame.
pub const MAX_DATA_BYTES: usize = 256 * 1024;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event name from the `event:` field, if any.
    pub event: Option<String>,
    /// Last event ID from the `id:` field, if any.
    pub id: Option<String>,
    /// `data:` lines joined with `\n`.
    pub data: String,
}

impl SseEvent {
    /// True for events a plain `onmessage` listener receives: no `event:`
    /// field, or `event: message`.
    pub fn is_message(&self) -> bool {
        self.event.as_deref().is_none_or(|name| name == "message")
    }
}

/// Turns arbitrary byte chunks into complete events.
///
/// Chunk boundaries may fall anywhere, including inside a `\r\n` pair or a
/// multi-byte UTF-8 sequence. Memory is bounded by [`MAX_LINE_BYTES`] and
/// [`MAX_DATA_BYTES`]; a frame exceeding either is dropped whole.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    /// Last byte consumed was a `\r`; a following `\n` belongs to it.
    pending_cr: bool,
    /// Current line went past the cap; its remaining bytes are skipped.
    line_overflow: bool,
    /// Current frame is oversized and will not be dispatched.
    frame_overflow: bool,
    event: Option<String>,
    id: Option<String>,
    data: Vec<String>,
    data_len: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if self.pending_cr {
                self.pending_cr = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\n' => self.end_line(&mut events),
                b'\r' => {
                    self.pending_cr = true;
                    self.end_line(&mut events);
                }
                _ if self.line_overflow => {}
                _ if self.buf.len() >= MAX_LINE_BYTES => {
                    self.line_overflow = true;
                    self.frame_overflow = true;
                    self.buf.clear();
                }
                _ => self.buf.push(byte),
            }
        }
        events
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        if self.line_overflow {
            self.line_overflow = false;
            return;
        }

        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_str(), ""),
        };
        match field {
            "data" => {
                self.data_len += value.len() + 1;
                if self.data_len > MAX_DATA_BYTES {
                    self.frame_overflow = true;
                    self.data.clear();
                } else if !self.frame_overflow {
                    self.data.push(value.to_string());
                }
            }
            "event" => self.event = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        let id = self.id.take();
        self.data_len = 0;
        if std::mem::take(&mut self.frame_overflow) {
            self.data.clear();
            warn!("Dropping oversized stream event");
            return None;
        }
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent { event, id, data })
    }
}
