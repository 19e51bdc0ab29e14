//! Fixed wiring for the submission feed
//!
//! The stream endpoint, the container id and the visible cap are part of the
//! host page contract and are not read from the environment.

use crate::render::Markup;

/// Digg streaming API, submissions only, event-stream framing
pub const STREAM_ENDPOINT: &str =
    "http://services.digg.com/2.0/stream?types=submission&format=event-stream";

/// Id of the `<ul>` the fragments are prepended into
pub const CONTAINER_ID: &str = "events";

/// Number of fragments kept visible after each insertion
pub const VISIBLE_CAP: usize = 5;

/// Base of the author profile link in a rendered fragment
pub const PROFILE_BASE_URL: &str = "http://digg.com/";

/// Named SSE event carrying a submission (in addition to unnamed `message` events)
pub const SUBMISSION_EVENT: &str = "submission";

/// Settings for a `StreamRenderer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    pub visible_cap: usize,
    pub markup: Markup,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            visible_cap: VISIBLE_CAP,
            markup: Markup::default(),
        }
    }
}

impl RendererConfig {
    /// Legacy markup, fields interpolated byte for byte (no escaping)
    pub fn verbatim() -> Self {
        Self {
            markup: Markup::Verbatim,
            ..Self::default()
        }
    }
}
