use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::feed::FeedContainer;
use crate::shared::errors::{Result, StreamError};

/// Page element whose element children are the visible fragments
pub struct DomContainer {
    element: Element,
}

impl DomContainer {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Look the container up by id in the current document
    pub fn find(id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| StreamError::Dom("no document in this context".to_string()))?;

        document
            .get_element_by_id(id)
            .map(Self::new)
            .ok_or_else(|| StreamError::ContainerMissing(id.to_string()))
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl FeedContainer for DomContainer {
    fn prepend(&mut self, fragment: &str) -> Result<()> {
        self.element
            .insert_adjacent_html("afterbegin", fragment)
            .map_err(js_error)
    }

    fn truncate_after(&mut self, keep: usize) -> Result<usize> {
        let mut removed = 0;
        while self.len() > keep {
            let Some(child) = self.element.last_element_child() else {
                break;
            };
            child.remove();
            removed += 1;
        }
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.element.child_element_count() as usize
    }
}

pub(crate) fn js_error(value: JsValue) -> StreamError {
    StreamError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
