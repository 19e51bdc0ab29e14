use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Invalid event payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Container not found: #{0}")]
    ContainerMissing(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Stream endpoint returned HTTP {0}")]
    Status(u16),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Stream already started")]
    AlreadyStarted,

    #[error("Stream task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for StreamError {
    fn from(e: reqwest::Error) -> Self {
        StreamError::Http(e.to_string())
    }
}
