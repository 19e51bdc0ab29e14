//! Bounded, newest-first list of rendered fragments
//!
//! `FeedContainer` is the seam between the renderer and whatever holds the
//! fragments: a DOM element in the browser, `VisibleList` everywhere else.

use std::collections::VecDeque;

use crate::shared::errors::Result;

/// Ordered child sequence supporting prepend and truncate-after-N
pub trait FeedContainer {
    /// Insert a fragment as the new first child
    fn prepend(&mut self, fragment: &str) -> Result<()>;

    /// Remove every child after the first `keep`; returns how many were removed
    fn truncate_after(&mut self, keep: usize) -> Result<usize>;

    /// Number of children currently attached
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory container, newest fragment first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleList {
    items: VecDeque<String>,
}

impl VisibleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    /// Owned copy of the current list, newest first
    pub fn snapshot(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}

impl FeedContainer for VisibleList {
    fn prepend(&mut self, fragment: &str) -> Result<()> {
        self.items.push_front(fragment.to_string());
        Ok(())
    }

    fn truncate_after(&mut self, keep: usize) -> Result<usize> {
        let removed = self.items.len().saturating_sub(keep);
        self.items.truncate(keep);
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
