// Public API exports (shared between browser and native hosts)
pub mod config;
pub mod domain;
pub mod feed;
pub mod render;
pub mod renderer;
pub mod shared;
pub mod stream;

// Native-only host (NOT compiled for WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// Browser content-script host (WASM only)
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use domain::models::SubmissionEvent;
pub use feed::{FeedContainer, VisibleList};
pub use render::{render, Markup};
pub use renderer::StreamRenderer;
pub use shared::errors::{Result, StreamError};
