// Native host: reqwest-backed event stream feeding an in-memory list

pub mod client;
pub mod session;

pub use client::{EventStream, SseClient};
pub use session::StreamSession;
