//! HTTP side of the native host: opens the event stream with reqwest

use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL};

use crate::shared::errors::{Result, StreamError};
use crate::stream::{SseDecoder, SseEvent};

#[derive(Debug, Clone)]
pub struct SseClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SseClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Open the stream; resolves once response headers arrive
    pub async fn connect(&self) -> Result<EventStream> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status(status.as_u16()));
        }

        Ok(EventStream {
            body: Box::pin(response.bytes_stream()),
            decoder: SseDecoder::new(),
            pending: Vec::new().into_iter(),
        })
    }
}

type ByteStream =
    std::pin::Pin<Box<dyn Stream<Item = reqwest::Result<bytes::Bytes>> + Send>>;

/// Decoded events of an open connection
pub struct EventStream {
    body: ByteStream,
    decoder: SseDecoder,
    pending: std::vec::IntoIter<SseEvent>,
}

impl EventStream {
    /// Next complete event; `None` once the server closes the stream
    pub async fn next_event(&mut self) -> Option<Result<SseEvent>> {
        loop {
            if let Some(event) = self.pending.next() {
                return Some(Ok(event));
            }

            match self.body.next().await? {
                Ok(chunk) => self.pending = self.decoder.feed(&chunk).into_iter(),
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
