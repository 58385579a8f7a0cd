use crate::document::Document;
use crate::error::Result;
use crate::host::EditorSurface;
use crate::layout::PaneId;
use crate::tab_group::TabGroup;

/// One visible editing region: a tab group plus the editing surface the
/// embedding UI gave it. The surface holds a working copy of the active
/// document's text; the canonical buffer lives in the `Document` and the
/// two are brought back in sync whenever the active tab changes.
pub struct Pane {
    pub id: PaneId,
    group: TabGroup,
    focused: bool,
    surface: Box<dyn EditorSurface>,
}

impl Pane {
    pub fn new(id: PaneId, group: TabGroup, surface: Box<dyn EditorSurface>) -> Self {
        let mut pane = Self {
            id,
            group,
            focused: false,
            surface,
        };
        pane.show_active();
        pane
    }

    /// Pull the surface's working copy back into the active document.
    /// Runs before anything reads or saves the active document's buffer.
    pub fn store_active(&mut self) {
        let text = self.surface.content();
        self.group.active_mut().set_content(text);
    }

    /// Push the active document's canonical buffer to the surface.
    fn show_active(&mut self) {
        let text = self.group.active().content().to_string();
        self.surface.set_content(&text);
    }

    /// Run a tab-group mutation with the surface kept in sync: the
    /// outgoing active document is stored first, the incoming one shown
    /// after.
    fn with_sync<T>(&mut self, op: impl FnOnce(&mut TabGroup) -> T) -> T {
        self.store_active();
        let result = op(&mut self.group);
        self.show_active();
        result
    }

    pub fn select_tab(&mut self, index: usize) -> Result<()> {
        self.with_sync(|group| group.set_active(index))
    }

    pub fn insert_doc(&mut self, doc: Document, at: Option<usize>) -> usize {
        self.with_sync(|group| group.insert(doc, at))
    }

    /// Swap the document in the active tab, as when an open reuses a
    /// blank tab.
    pub fn replace_active_doc(&mut self, doc: Document) {
        *self.group.active_mut() = doc;
        self.show_active();
    }

    pub fn close_tab(&mut self, index: usize) -> Result<()> {
        self.with_sync(|group| group.close(index))
    }

    pub fn take_tab(&mut self, index: usize) -> Result<Document> {
        self.with_sync(|group| group.take(index))
    }

    /// Reorder tabs. The active document does not change, so the surface
    /// needs no sync.
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        self.group.move_tab(from, to)
    }

    pub fn next_tab(&mut self, wrap: bool) {
        self.with_sync(|group| group.next(wrap));
    }

    pub fn prev_tab(&mut self, wrap: bool) {
        self.with_sync(|group| group.prev(wrap));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn current_document(&self) -> &Document {
        self.group.active()
    }

    pub fn current_document_mut(&mut self) -> &mut Document {
        self.group.active_mut()
    }

    pub fn document_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.group.get_mut(index)
    }

    pub fn group(&self) -> &TabGroup {
        &self.group
    }

    pub fn surface(&self) -> &dyn EditorSurface {
        self.surface.as_ref()
    }

    /// The embedding UI edits through this handle; every mutation must
    /// be followed by a content-changed notification to the workspace.
    pub fn surface_mut(&mut self) -> &mut dyn EditorSurface {
        self.surface.as_mut()
    }
}
