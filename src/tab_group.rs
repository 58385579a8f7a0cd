use crate::document::Document;
use crate::error::{Result, WorkspaceError};

/// Ordered documents shown as tabs in one pane, with one active tab.
/// The group is never empty: closing or dragging out the last tab
/// replaces it with a fresh untitled document.
#[derive(Debug)]
pub struct TabGroup {
    tabs: Vec<Document>,
    active: usize,
}

impl TabGroup {
    pub fn new() -> Self {
        Self::with(Document::new())
    }

    pub fn with(doc: Document) -> Self {
        Self {
            tabs: vec![doc],
            active: 0,
        }
    }

    /// Insert a document at `at` (the end when `None`) and activate it.
    /// Returns the index it landed on.
    pub fn insert(&mut self, doc: Document, at: Option<usize>) -> usize {
        let index = at.unwrap_or(self.tabs.len()).min(self.tabs.len());
        self.tabs.insert(index, doc);
        self.active = index;
        index
    }

    /// Remove the tab at `index` and drop its document. The confirmation
    /// protocol must already have run for a dirty document.
    pub fn close(&mut self, index: usize) -> Result<()> {
        self.take(index).map(|_| ())
    }

    /// Remove the tab at `index` and hand its document back, for moving
    /// it into another group. Shares the refill and reactivation rules
    /// with `close`: the active index stays put and clamps at the end,
    /// so closing the active tab activates the one sliding into its
    /// place.
    pub fn take(&mut self, index: usize) -> Result<Document> {
        let len = self.tabs.len();
        if index >= len {
            return Err(WorkspaceError::TabIndex { index, len });
        }
        let doc = self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.tabs.push(Document::new());
            self.active = 0;
        } else if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        Ok(doc)
    }

    /// Reorder a tab. The active tab stays on the same document; its
    /// index follows the move.
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tabs.len();
        if from >= len {
            return Err(WorkspaceError::TabIndex { index: from, len });
        }
        if to >= len {
            return Err(WorkspaceError::TabIndex { index: to, len });
        }
        if from == to {
            return Ok(());
        }
        let doc = self.tabs.remove(from);
        self.tabs.insert(to, doc);
        if self.active == from {
            self.active = to;
        } else if from < self.active && to >= self.active {
            self.active -= 1;
        } else if from > self.active && to <= self.active {
            self.active += 1;
        }
        Ok(())
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(WorkspaceError::TabIndex {
                index,
                len: self.tabs.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    pub fn next(&mut self, wrap: bool) {
        if self.active + 1 < self.tabs.len() {
            self.active += 1;
        } else if wrap {
            self.active = 0;
        }
    }

    pub fn prev(&mut self, wrap: bool) {
        if let Some(prev) = self.active.checked_sub(1) {
            self.active = prev;
        } else if wrap {
            self.active = self.tabs.len() - 1;
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Document {
        &self.tabs[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Document {
        &mut self.tabs[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.tabs.get_mut(index)
    }

    pub fn tabs(&self) -> &[Document] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

impl Default for TabGroup {
    fn default() -> Self {
        Self::new()
    }
}
