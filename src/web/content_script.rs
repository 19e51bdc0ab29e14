//! Browser host: EventSource → StreamRenderer → DOM
//!
//! The page keeps at most one live `ContentScript`; `launch` installs it and
//! the exported `stopStream` closes it. Reconnection after a network error is
//! left to the browser's EventSource.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource, MessageEvent};

use crate::config::{RendererConfig, CONTAINER_ID, STREAM_ENDPOINT, SUBMISSION_EVENT};
use crate::renderer::StreamRenderer;
use crate::shared::errors::{Result, StreamError};
use crate::shared::logging;

use super::container::{js_error, DomContainer};

type SharedRenderer = Rc<RefCell<StreamRenderer<DomContainer>>>;

pub struct ContentScript {
    endpoint: String,
    source: EventSource,
    renderer: SharedRenderer,
    on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_error: Closure<dyn FnMut(Event)>,
    closed: bool,
}

impl ContentScript {
    /// Open the stream and start prepending submissions into `container`
    pub fn start(endpoint: &str, container: DomContainer, config: RendererConfig) -> Result<Self> {
        logging::log_stream_connecting(endpoint);

        let source = EventSource::new(endpoint)
            .map_err(|e| StreamError::Connection(format!("{:?}", e)))?;
        let renderer: SharedRenderer =
            Rc::new(RefCell::new(StreamRenderer::with_config(container, config)));

        let handler_renderer = renderer.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(data) = event.data().as_string() else {
                logging::log_message_ignored(&event.type_());
                return;
            };
            logging::log_message_received(&event.type_(), &data);

            match handler_renderer.try_borrow_mut() {
                Ok(mut renderer) => {
                    renderer.handle_message(&data);
                }
                Err(_) => logging::log_message_dropped("renderer busy", &data),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        source
            .add_event_listener_with_callback(SUBMISSION_EVENT, on_message.as_ref().unchecked_ref())
            .map_err(js_error)?;

        let open_endpoint = endpoint.to_string();
        let on_open = Closure::wrap(Box::new(move |_: Event| {
            logging::log_stream_open(&open_endpoint);
        }) as Box<dyn FnMut(Event)>);
        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let error_endpoint = endpoint.to_string();
        let on_error = Closure::wrap(Box::new(move |_: Event| {
            logging::log_stream_error(&error_endpoint, "EventSource error");
        }) as Box<dyn FnMut(Event)>);
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            endpoint: endpoint.to_string(),
            source,
            renderer,
            on_message,
            _on_open: on_open,
            _on_error: on_error,
            closed: false,
        })
    }

    /// Close the EventSource and detach handlers; safe to call repeatedly
    pub fn stop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.source.close();
        self.source.set_onmessage(None);
        self.source.set_onopen(None);
        self.source.set_onerror(None);
        let _ = self.source.remove_event_listener_with_callback(
            SUBMISSION_EVENT,
            self.on_message.as_ref().unchecked_ref(),
        );

        logging::log_stream_closed(&self.endpoint, "stopped");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// (rendered, dropped) message counts
    pub fn stats(&self) -> (u64, u64) {
        let renderer = self.renderer.borrow();
        (renderer.rendered(), renderer.dropped())
    }
}

impl Drop for ContentScript {
    fn drop(&mut self) {
        self.stop();
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<ContentScript>> = const { RefCell::new(None) };
}

/// Start the page's feed against `#events` and the fixed endpoint
pub fn launch() -> Result<()> {
    ACTIVE.with(|active| {
        let mut active = active.borrow_mut();
        if active.as_ref().is_some_and(|script| !script.is_closed()) {
            return Err(StreamError::AlreadyStarted);
        }

        let container = DomContainer::find(CONTAINER_ID)?;
        *active = Some(ContentScript::start(
            STREAM_ENDPOINT,
            container,
            RendererConfig::default(),
        )?);
        Ok(())
    })
}

/// Close the page's feed, if one is running
#[wasm_bindgen(js_name = stopStream)]
pub fn stop_stream() {
    ACTIVE.with(|active| {
        if let Some(mut script) = active.borrow_mut().take() {
            script.stop();
        }
    });
}
