//! Structured logging for the submission feed
//!
//! Provides consistent, contextual logging for both hosts.
//! Uses tracing structured fields; the subscriber is installed by the native binary.

/// Operations that emit log records
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Connect,
    Receive,
    Render,
    Disconnect,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Connect => "connect",
            LogOperation::Receive => "receive",
            LogOperation::Render => "render",
            LogOperation::Disconnect => "disconnect",
        }
    }
}

/// Longest payload excerpt written into a diagnostic
const PREVIEW_CHARS: usize = 200;

/// Cut a payload down for a log line, on a char boundary
pub fn payload_preview(payload: &str) -> &str {
    match payload.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &payload[..idx],
        None => payload,
    }
}

/// Log stream connection attempt
pub fn log_stream_connecting(endpoint: &str) {
    tracing::info!(
        operation = LogOperation::Connect.as_str(),
        endpoint = endpoint,
        "Connecting to submission stream"
    );
}

/// Log stream connection established
pub fn log_stream_open(endpoint: &str) {
    tracing::info!(
        operation = LogOperation::Connect.as_str(),
        endpoint = endpoint,
        "Submission stream open"
    );
}

/// Log connection-level failure
pub fn log_stream_error(endpoint: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::Connect.as_str(),
        endpoint = endpoint,
        error = error,
        "Submission stream error"
    );
}

/// Log an inbound message before decoding
pub fn log_message_received(event_type: &str, payload: &str) {
    tracing::debug!(
        operation = LogOperation::Receive.as_str(),
        event_type = event_type,
        payload_len = payload.len(),
        "Received stream message"
    );
}

/// Log a message skipped by the stream filter
pub fn log_message_ignored(event_type: &str) {
    tracing::trace!(
        operation = LogOperation::Receive.as_str(),
        event_type = event_type,
        "Ignored stream event"
    );
}

/// Log an event-stream line dropped for exceeding the line limit
pub fn log_line_discarded(len: usize) {
    tracing::warn!(
        operation = LogOperation::Receive.as_str(),
        line_len = len,
        "Discarded overlong stream line"
    );
}

/// Log a message that could not be decoded or inserted
pub fn log_message_dropped(error: &str, payload: &str) {
    tracing::warn!(
        operation = LogOperation::Render.as_str(),
        error = error,
        payload = payload_preview(payload),
        "Received invalid event"
    );
}

/// Log a fragment that was inserted but could not be trimmed back to the cap
pub fn log_trim_failed(error: &str, visible: usize) {
    tracing::warn!(
        operation = LogOperation::Render.as_str(),
        error = error,
        visible = visible,
        "Inserted submission but trimming failed"
    );
}

/// Log a fragment inserted at the top of the list
pub fn log_fragment_inserted(author: &str, visible: usize, trimmed: usize) {
    tracing::debug!(
        operation = LogOperation::Render.as_str(),
        author = author,
        visible = visible,
        trimmed = trimmed,
        "Inserted submission"
    );
}

/// Browser console method a record of the given level is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    pub fn for_level(level: &tracing::Level) -> Self {
        if *level == tracing::Level::ERROR {
            ConsoleMethod::Error
        } else if *level == tracing::Level::WARN {
            ConsoleMethod::Warn
        } else if *level == tracing::Level::INFO {
            ConsoleMethod::Info
        } else {
            ConsoleMethod::Debug
        }
    }
}

/// One formatted record as a console line, without the trailing newline
pub fn console_line(buffer: &[u8]) -> std::borrow::Cow<'_, str> {
    match String::from_utf8_lossy(buffer) {
        std::borrow::Cow::Borrowed(line) => std::borrow::Cow::Borrowed(line.trim_end()),
        std::borrow::Cow::Owned(line) => std::borrow::Cow::Owned(line.trim_end().to_string()),
    }
}

/// Log stream shutdown
pub fn log_stream_closed(endpoint: &str, reason: &str) {
    tracing::info!(
        operation = LogOperation::Disconnect.as_str(),
        endpoint = endpoint,
        reason = reason,
        "Submission stream closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_operation_as_str() {
        assert_eq!(LogOperation::Connect.as_str(), "connect");
        assert_eq!(LogOperation::Receive.as_str(), "receive");
        assert_eq!(LogOperation::Render.as_str(), "render");
        assert_eq!(LogOperation::Disconnect.as_str(), "disconnect");
    }

    #[test]
    fn test_console_method_for_level() {
        assert_eq!(ConsoleMethod::for_level(&tracing::Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(&tracing::Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(&tracing::Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::for_level(&tracing::Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(ConsoleMethod::for_level(&tracing::Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn test_console_line_trims_newline() {
        assert_eq!(console_line(b" WARN Received invalid event\n"), " WARN Received invalid event");
        assert_eq!(console_line(b""), "");
        assert_eq!(console_line(b"bad \xFF\n"), "bad \u{FFFD}");
    }

    #[test]
    fn test_payload_preview_short() {
        assert_eq!(payload_preview("{}"), "{}");
    }

    #[test]
    fn test_payload_preview_truncates_on_char_boundary() {
        let payload = "é".repeat(300);
        let preview = payload_preview(&payload);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS);
    }
}
