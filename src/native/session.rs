//! Native counterpart of the content script: one live stream, one bounded list
//!
//! `start` spawns the read loop on the current tokio runtime, `stop` aborts it.
//! Every accepted submission publishes a fresh snapshot of the visible list.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SUBMISSION_EVENT;
use crate::feed::VisibleList;
use crate::renderer::StreamRenderer;
use crate::shared::errors::{Result, StreamError};
use crate::shared::logging;
use crate::stream::{SseEvent, DEFAULT_EVENT_TYPE};

use super::client::SseClient;

type SharedRenderer = Arc<Mutex<StreamRenderer<VisibleList>>>;

pub struct StreamSession {
    client: SseClient,
    renderer: SharedRenderer,
    updates: Arc<watch::Sender<Vec<String>>>,
    task: Option<JoinHandle<Result<()>>>,
}

impl StreamSession {
    pub fn new(client: SseClient, renderer: StreamRenderer<VisibleList>) -> Self {
        let (updates, _) = watch::channel(renderer.container().snapshot());
        Self {
            client,
            renderer: Arc::new(Mutex::new(renderer)),
            updates: Arc::new(updates),
            task: None,
        }
    }

    /// Open the stream and start rendering; must run inside a tokio runtime
    pub fn start(&mut self) -> Result<()> {
        if self.task.is_some() {
            return Err(StreamError::AlreadyStarted);
        }

        let client = self.client.clone();
        let renderer = self.renderer.clone();
        let updates = self.updates.clone();

        self.task = Some(tokio::spawn(async move {
            let result = run_stream(&client, &renderer, &updates).await;
            match &result {
                Ok(()) => logging::log_stream_closed(client.endpoint(), "server closed the stream"),
                Err(e) => logging::log_stream_error(client.endpoint(), &e.to_string()),
            }
            result
        }));
        Ok(())
    }

    /// Close the connection; safe to call repeatedly
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            logging::log_stream_closed(self.client.endpoint(), "stopped");
        }
    }

    /// Wait for the stream to end on its own (or for a prior `stop`)
    ///
    /// Cancel safe: dropping the future leaves the session running.
    pub async fn wait(&mut self) -> Result<()> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };

        let outcome = task.await;
        self.task = None;
        match outcome {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(StreamError::Task(e.to_string())),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Receiver of the visible list, republished after each inserted submission
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.updates.subscribe()
    }

    /// Current visible list, newest first
    pub fn visible(&self) -> Vec<String> {
        lock(&self.renderer).container().snapshot()
    }

    /// (rendered, dropped) message counts
    pub fn stats(&self) -> (u64, u64) {
        let renderer = lock(&self.renderer);
        (renderer.rendered(), renderer.dropped())
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Events a content script's handlers would fire for
fn is_submission(event: &SseEvent) -> bool {
    event.is_type(DEFAULT_EVENT_TYPE) || event.is_type(SUBMISSION_EVENT)
}

fn lock(renderer: &SharedRenderer) -> MutexGuard<'_, StreamRenderer<VisibleList>> {
    renderer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn run_stream(
    client: &SseClient,
    renderer: &SharedRenderer,
    updates: &watch::Sender<Vec<String>>,
) -> Result<()> {
    logging::log_stream_connecting(client.endpoint());
    let mut events = client.connect().await?;
    logging::log_stream_open(client.endpoint());

    while let Some(event) = events.next_event().await {
        let event = event?;
        if !is_submission(&event) {
            logging::log_message_ignored(&event.event);
            continue;
        }
        logging::log_message_received(&event.event, &event.data);

        let snapshot = {
            let mut renderer = lock(renderer);
            if !renderer.handle_message(&event.data) {
                continue;
            }
            renderer.container().snapshot()
        };
        updates.send_replace(snapshot);
    }

    Ok(())
}
