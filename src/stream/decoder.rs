//! Incremental `text/event-stream` decoder
//!
//! Bytes go in as they arrive off the wire, complete events come out.
//! Follows the browser EventSource parsing rules so the native host sees the
//! same events a content script would.

use crate::shared::logging;

/// Event type used when a block carries no `event:` field
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// One dispatched server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event == event_type
    }
}

/// Longest line kept; anything longer is discarded up to its line ending
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// UTF-8 byte order mark, skipped once at the start of the stream
const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug)]
pub struct SseDecoder {
    line: Vec<u8>,
    max_line: usize,
    // Rest of the current line is being thrown away
    overlong: bool,
    // Leading bytes matched against the BOM; None once the stream has started
    bom_matched: Option<usize>,
    // Last byte was CR; a following LF belongs to the same line ending
    after_cr: bool,
    event_type: Option<String>,
    data: String,
    has_data: bool,
    last_event_id: Option<String>,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            line: Vec::new(),
            max_line,
            overlong: false,
            bom_matched: Some(0),
            after_cr: false,
            event_type: None,
            data: String::new(),
            has_data: false,
            last_event_id: None,
        }
    }

    /// Feed a chunk of the body, returning every event it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();

        for &byte in chunk {
            if let Some(matched) = self.bom_matched {
                if byte == BOM[matched] {
                    self.bom_matched = (matched + 1 < BOM.len()).then_some(matched + 1);
                    continue;
                }
                // A partial BOM was ordinary line content
                self.bom_matched = None;
                self.line.extend_from_slice(&BOM[..matched]);
            }

            if self.after_cr {
                self.after_cr = false;
                if byte == b'\n' {
                    continue;
                }
            }

            match byte {
                b'\n' => self.end_line(&mut events),
                b'\r' => {
                    self.end_line(&mut events);
                    self.after_cr = true;
                }
                _ => self.push_byte(byte),
            }
        }

        events
    }

    fn push_byte(&mut self, byte: u8) {
        if self.overlong {
            return;
        }
        if self.line.len() >= self.max_line {
            logging::log_line_discarded(self.line.len());
            self.line = Vec::new();
            self.overlong = true;
            return;
        }
        self.line.push(byte);
    }

    /// Last `id:` seen on the stream
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        let raw = std::mem::take(&mut self.line);
        if std::mem::take(&mut self.overlong) {
            return;
        }
        let line = String::from_utf8_lossy(&raw);

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }

        // Comment / keep-alive
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (&*line, ""),
        };

        match field {
            "event" => self.event_type = Some(value.to_string()),
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "id" => {
                if !value.contains('\0') {
                    self.last_event_id = Some(value.to_string());
                }
            }
            // `retry` only tunes reconnection, which is not performed here
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event_type = self.event_type.take();

        if !self.has_data {
            return None;
        }
        self.has_data = false;

        Some(SseEvent {
            event: event_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            data: std::mem::take(&mut self.data),
            id: self.last_event_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(input: &[u8]) -> Vec<SseEvent> {
        SseDecoder::new().feed(input)
    }

    #[test]
    fn test_single_message() {
        let events = decode_all(b"data: {\"a\":1}\n\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "message");
        assert_eq!(events[0].data, "{\"a\":1}");
        assert_eq!(events[0].id, None);
    }

    #[test]
    fn test_named_event_and_id() {
        let events = decode_all(b"id: 7\nevent: submission\ndata: x\n\n");

        assert_eq!(events[0].event, "submission");
        assert!(events[0].is_type("submission"));
        assert_eq!(events[0].id.as_deref(), Some("7"));
    }

    #[test]
    fn test_multiline_data_joined_with_newline() {
        let events = decode_all(b"data: first\ndata:second\ndata\n\n");
        assert_eq!(events[0].data, "first\nsecond\n");
    }

    #[test]
    fn test_comments_and_unknown_fields_ignored() {
        let events = decode_all(b": keep-alive\nretry: 3000\nfoo: bar\ndata: x\n\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn test_block_without_data_not_dispatched() {
        let events = decode_all(b"event: submission\n\ndata: y\n\n");

        assert_eq!(events.len(), 1);
        // Event type does not leak into the next block
        assert_eq!(events[0].event, "message");
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let events = decode_all(b"data: a\r\n\r\ndata: b\r\rdata: c\n\n");
        let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: a\r").is_empty());
        assert_eq!(decoder.feed(b"\n\r").len(), 1);
        assert_eq!(decoder.feed(b"\ndata: b\n\n").len(), 1);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"da").is_empty());
        assert!(decoder.feed(b"ta: hel").is_empty());
        assert!(decoder.feed(b"lo\n").is_empty());

        let events = decoder.feed(b"\n");
        assert_eq!(events[0].data, "hello");
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let bytes = "data: café\n\n".as_bytes();
        let split = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&bytes[..split]).is_empty());
        let events = decoder.feed(&bytes[split..]);
        assert_eq!(events[0].data, "café");
    }

    #[test]
    fn test_id_persists_and_nul_id_ignored() {
        let mut decoder = SseDecoder::new();
        decoder.feed(b"id: 1\ndata: a\n\n");
        let events = decoder.feed(b"id: bad\0id\ndata: b\n\n");

        assert_eq!(events[0].id.as_deref(), Some("1"));
        assert_eq!(decoder.last_event_id(), Some("1"));
    }

    #[test]
    fn test_leading_bom_skipped() {
        let events = decode_all("\u{FEFF}data: first\n\ndata: second\n\n".as_bytes());
        let data: Vec<_> = events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, vec!["first", "second"]);
    }

    #[test]
    fn test_leading_bom_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\xEF").is_empty());
        assert!(decoder.feed(b"\xBB").is_empty());
        let events = decoder.feed(b"\xBFdata: first\n\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "first");
    }

    #[test]
    fn test_only_first_bom_skipped() {
        let events = decode_all("\u{FEFF}\u{FEFF}data: x\n\ndata: y\n\n".as_bytes());
        // Second BOM makes the first field name unknown
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "y");
    }

    #[test]
    fn test_bom_after_first_line_is_content() {
        let events = decode_all("data: a\n\n\u{FEFF}data: b\n\n".as_bytes());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "a");
    }

    #[test]
    fn test_overlong_line_discarded() {
        let mut decoder = SseDecoder::with_max_line(16);
        let long = format!("data: {}\n\n", "x".repeat(64));
        assert!(decoder.feed(long.as_bytes()).is_empty());

        let events = decoder.feed(b"data: short\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "short");
    }

    #[test]
    fn test_overlong_line_split_across_chunks() {
        let mut decoder = SseDecoder::with_max_line(8);
        assert!(decoder.feed(b"data: 0123").is_empty());
        assert!(decoder.feed(b"456789").is_empty());
        assert!(decoder.feed(b"\n\ndata: ok\n").is_empty());

        let events = decoder.feed(b"\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "ok");
    }

    #[test]
    fn test_trailing_partial_event_not_dispatched() {
        let events = decode_all(b"data: a\n\ndata: incomplete\n");
        assert_eq!(events.len(), 1);
    }
}
