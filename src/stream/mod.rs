// text/event-stream framing
// Target independent; the native host feeds it raw body chunks

pub mod decoder;

pub use decoder::{SseDecoder, SseEvent, DEFAULT_EVENT_TYPE};
