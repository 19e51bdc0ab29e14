//! StreamRenderer: keeps a bounded feed in sync with inbound submissions
//!
//! Each message is decoded, rendered, prepended and then the container is
//! trimmed back to the visible cap. Hosts call `handle_message`, which logs
//! and skips a bad message instead of failing the whole stream.

use crate::config::RendererConfig;
use crate::domain::models::SubmissionEvent;
use crate::feed::FeedContainer;
use crate::shared::errors::Result;
use crate::shared::logging;

pub struct StreamRenderer<C> {
    container: C,
    config: RendererConfig,
    rendered: u64,
    dropped: u64,
}

impl<C: FeedContainer> StreamRenderer<C> {
    pub fn new(container: C) -> Self {
        Self::with_config(container, RendererConfig::default())
    }

    pub fn with_config(container: C, config: RendererConfig) -> Self {
        Self {
            container,
            config,
            rendered: 0,
            dropped: 0,
        }
    }

    /// Decode → render → prepend → trim for one payload
    pub fn on_message(&mut self, payload: &str) -> Result<()> {
        let event = SubmissionEvent::decode(payload)?;
        let fragment = self.config.markup.render(&event);

        self.container.prepend(&fragment)?;
        // Visible from here on, even if trimming fails
        self.rendered += 1;
        let trimmed = self.container.truncate_after(self.config.visible_cap)?;

        logging::log_fragment_inserted(&event.user.name, self.container.len(), trimmed);
        Ok(())
    }

    /// Like `on_message`, but a failure is logged instead of returned
    ///
    /// Returns whether the fragment was inserted. Only messages that never
    /// reached the container count as dropped.
    pub fn handle_message(&mut self, payload: &str) -> bool {
        let rendered_before = self.rendered;
        match self.on_message(payload) {
            Ok(()) => true,
            Err(e) if self.rendered > rendered_before => {
                logging::log_trim_failed(&e.to_string(), self.container.len());
                true
            }
            Err(e) => {
                self.dropped += 1;
                logging::log_message_dropped(&e.to_string(), payload);
                false
            }
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Messages inserted so far
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    /// Messages skipped because they could not be decoded or inserted
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
