use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::document::Document;
use crate::drag::{DropCommand, MoveTabRequest, SplitRequest};
use crate::error::{Result, WorkspaceError};
use crate::host::{
    self, ConfirmOutcome, DialogService, FileSystem, Host, StatusSink, SurfaceFactory,
};
use crate::layout::{FocusDirection, LayoutNode, PaneId, Side, SplitDirection};
use crate::pane::Pane;
use crate::session::{store, Session};
use crate::tab_group::TabGroup;

/// Where the confirmation protocol stands. At most one prompt is in
/// flight at a time; the pending entry names the document it is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfirmState {
    Idle,
    Pending { pane: PaneId, tab: usize },
}

/// How a resolved confirmation affects the operation that raised it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmResolution {
    /// The destructive operation may go ahead.
    Proceed,
    /// The operation is dropped; nothing was mutated.
    Aborted,
}

/// Orchestrates documents, tab groups, panes, and the split layout, and
/// runs the unsaved-changes confirmation protocol in front of every
/// destructive operation. All methods are synchronous and expect to be
/// driven from the embedding application's event thread.
pub struct Workspace {
    panes: HashMap<PaneId, Pane>,
    layout: LayoutNode,
    focused: PaneId,
    confirm: ConfirmState,
    config: Config,
    fs: Box<dyn FileSystem>,
    dialogs: Box<dyn DialogService>,
    status: Box<dyn StatusSink>,
    surfaces: Box<dyn SurfaceFactory>,
}

impl Workspace {
    /// Start with a single pane holding one untitled document.
    pub fn new(host: Host, config: Config) -> Self {
        let Host {
            fs,
            dialogs,
            status,
            mut surfaces,
        } = host;
        let id = PaneId::new_v4();
        let mut pane = Pane::new(id, TabGroup::new(), surfaces.create());
        pane.set_focused(true);
        let mut panes = HashMap::new();
        panes.insert(id, pane);

        let mut workspace = Self {
            panes,
            layout: LayoutNode::Leaf(id),
            focused: id,
            confirm: ConfirmState::Idle,
            config,
            fs,
            dialogs,
            status,
            surfaces,
        };
        workspace.emit_title();
        workspace
    }

    pub fn layout(&self) -> &LayoutNode {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focused_pane_id(&self) -> PaneId {
        self.focused
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    pub fn pane_mut(&mut self, id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(&id)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn focused_pane(&self) -> &Pane {
        self.panes.get(&self.focused).unwrap()
    }

    fn focused_pane_mut(&mut self) -> &mut Pane {
        self.panes.get_mut(&self.focused).unwrap()
    }

    pub fn active_document(&self) -> &Document {
        self.focused_pane().current_document()
    }

    pub fn confirm_pending(&self) -> bool {
        matches!(self.confirm, ConfirmState::Pending { .. })
    }

    // -----------------------------------------------------------------
    // Confirmation protocol
    // -----------------------------------------------------------------

    /// Gate a destructive operation on one document. Clean documents
    /// pass straight through; dirty ones raise the save prompt and the
    /// resolved outcome decides.
    fn confirm_destroy(&mut self, pane_id: PaneId, tab: usize) -> ConfirmResolution {
        let Some(pane) = self.panes.get(&pane_id) else {
            return ConfirmResolution::Aborted;
        };
        let Some(doc) = pane.group().get(tab) else {
            return ConfirmResolution::Aborted;
        };
        if !doc.is_dirty() {
            return ConfirmResolution::Proceed;
        }
        let name = doc.display_name();
        self.confirm = ConfirmState::Pending { pane: pane_id, tab };
        let outcome = self.dialogs.prompt_save_changes(&name);
        self.resolve_confirmation(outcome)
    }

    /// Feed the user's answer to the pending save prompt back in.
    /// `Saved` saves the document first (routing into save-as when it
    /// has no path) and proceeds only if that worked; `Discarded`
    /// proceeds without saving; `Cancelled` drops the operation. The
    /// protocol returns to idle either way. Without a pending prompt
    /// there is nothing to proceed with.
    pub fn resolve_confirmation(&mut self, outcome: ConfirmOutcome) -> ConfirmResolution {
        let ConfirmState::Pending { pane, tab } = self.confirm else {
            return ConfirmResolution::Aborted;
        };
        self.confirm = ConfirmState::Idle;
        match outcome {
            ConfirmOutcome::Saved => {
                if self.save_tab(pane, tab) {
                    ConfirmResolution::Proceed
                } else {
                    ConfirmResolution::Aborted
                }
            }
            ConfirmOutcome::Discarded => ConfirmResolution::Proceed,
            ConfirmOutcome::Cancelled => ConfirmResolution::Aborted,
        }
    }

    // -----------------------------------------------------------------
    // Command surface
    // -----------------------------------------------------------------

    /// Add a fresh untitled tab to the focused pane and activate it.
    pub fn new_tab(&mut self) {
        self.focused_pane_mut().insert_doc(Document::new(), None);
        self.emit_title();
    }

    /// Prompt for a file and open it.
    pub fn open_tab(&mut self) {
        let start = self.dialog_start_dir();
        let Some(path) = self.dialogs.prompt_open_path(&start) else {
            return;
        };
        self.open_file(path);
    }

    /// Open `path` in the focused pane: into the active tab while it is
    /// still blank, otherwise into a new tab after it. Opening never
    /// destroys unsaved content. A read failure is reported and changes
    /// nothing.
    pub fn open_file(&mut self, path: PathBuf) {
        let doc = match Document::open(self.fs.as_ref(), path) {
            Ok(doc) => doc,
            Err(e) => {
                self.report(&e);
                return;
            }
        };
        let pane = self.focused_pane_mut();
        if pane.current_document().is_blank() {
            pane.replace_active_doc(doc);
        } else {
            let after = pane.group().active_index() + 1;
            pane.insert_doc(doc, Some(after));
        }
        self.emit_title();
    }

    /// Save the focused pane's active document. Returns whether it is
    /// clean on disk afterwards.
    pub fn save_active(&mut self) -> bool {
        let pane = self.focused;
        let tab = self.focused_pane().group().active_index();
        self.save_tab(pane, tab)
    }

    /// Save the focused pane's active document under a path chosen by
    /// the user.
    pub fn save_active_as(&mut self) -> bool {
        let pane = self.focused;
        let tab = self.focused_pane().group().active_index();
        self.save_tab_as(pane, tab)
    }

    /// Close the focused pane's active tab, running the confirmation
    /// protocol first when it has unsaved changes.
    pub fn close_active_tab(&mut self) -> Result<()> {
        let pane_id = self.focused;
        let tab = self.focused_pane().group().active_index();
        if self.confirm_destroy(pane_id, tab) == ConfirmResolution::Aborted {
            return Ok(());
        }
        if let Some(pane) = self.panes.get_mut(&pane_id) {
            pane.close_tab(tab)?;
        }
        self.emit_title();
        Ok(())
    }

    /// Split the focused pane, seed the new half with an untitled
    /// document, and focus it.
    pub fn split_pane(&mut self, direction: SplitDirection) -> Result<()> {
        let target = self.focused;
        let new_id = PaneId::new_v4();
        self.layout.split(target, direction, Side::Second, new_id)?;
        let pane = Pane::new(new_id, TabGroup::new(), self.surfaces.create());
        self.panes.insert(new_id, pane);
        self.focus_pane(new_id)
    }

    /// Close the focused pane after confirming its dirty tabs, merging
    /// its space into the sibling subtree. Returns whether the pane was
    /// actually closed. The last pane cannot be merged out; quitting is
    /// how the whole workspace goes away.
    pub fn close_active_pane(&mut self) -> Result<bool> {
        if matches!(self.layout, LayoutNode::Leaf(_)) {
            return Err(WorkspaceError::CannotMergeRoot);
        }
        let pane_id = self.focused;
        self.focused_pane_mut().store_active();
        let tab_count = self.focused_pane().group().tab_count();
        for tab in 0..tab_count {
            if self.confirm_destroy(pane_id, tab) == ConfirmResolution::Aborted {
                return Ok(false);
            }
        }
        let refocus = self.layout.merge_out(pane_id)?;
        self.panes.remove(&pane_id);
        self.focus_pane(refocus)?;
        Ok(true)
    }

    /// Quit protocol: confirm every dirty document in every pane.
    /// Returns whether the application may exit. Saves performed before
    /// a cancel stick; nothing else is mutated.
    pub fn quit(&mut self) -> bool {
        for pane_id in self.layout.pane_ids() {
            if let Some(pane) = self.panes.get_mut(&pane_id) {
                pane.store_active();
            }
            let tab_count = self
                .panes
                .get(&pane_id)
                .map(|pane| pane.group().tab_count())
                .unwrap_or(0);
            for tab in 0..tab_count {
                if self.confirm_destroy(pane_id, tab) == ConfirmResolution::Aborted {
                    return false;
                }
            }
        }
        true
    }

    // -----------------------------------------------------------------
    // Focus and tabs
    // -----------------------------------------------------------------

    /// Move focus to `pane`, clearing the flag on every other pane.
    pub fn focus_pane(&mut self, pane_id: PaneId) -> Result<()> {
        if !self.panes.contains_key(&pane_id) {
            return Err(WorkspaceError::PaneNotFound(pane_id));
        }
        for pane in self.panes.values_mut() {
            pane.set_focused(pane.id == pane_id);
        }
        self.focused = pane_id;
        self.emit_title();
        Ok(())
    }

    /// Move focus to the neighboring pane in a screen direction, if
    /// there is one.
    pub fn focus_neighbor(&mut self, dir: FocusDirection) -> Result<()> {
        match self.layout.find_neighbor(self.focused, dir) {
            Some(id) => self.focus_pane(id),
            None => Ok(()),
        }
    }

    /// Activate a tab, focusing its pane.
    pub fn set_active_tab(&mut self, pane_id: PaneId, index: usize) -> Result<()> {
        self.focus_pane(pane_id)?;
        self.focused_pane_mut().select_tab(index)?;
        self.emit_title();
        Ok(())
    }

    /// Reorder tabs within the focused pane.
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        self.focused_pane_mut().move_tab(from, to)
    }

    pub fn next_tab(&mut self) {
        let wrap = self.config.wrap_tab_cycling;
        self.focused_pane_mut().next_tab(wrap);
        self.emit_title();
    }

    pub fn prev_tab(&mut self) {
        let wrap = self.config.wrap_tab_cycling;
        self.focused_pane_mut().prev_tab(wrap);
        self.emit_title();
    }

    // -----------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------

    pub fn set_split_ratio(&mut self, pane_id: PaneId, ratio: f64) -> Result<()> {
        self.layout.set_ratio(pane_id, ratio)
    }

    pub fn equalize(&mut self) {
        self.layout.equalize();
    }

    /// Apply a finished drag. The document travels with the tab, so no
    /// content is destroyed and no confirmation runs; a source group
    /// emptied by the move refills with an untitled tab and its pane
    /// stays.
    pub fn apply_drop(&mut self, command: DropCommand) -> Result<()> {
        match command {
            DropCommand::MoveTab(req) => self.apply_move_tab(req),
            DropCommand::Split(req) => self.apply_split(req),
        }
    }

    fn apply_move_tab(&mut self, req: MoveTabRequest) -> Result<()> {
        if req.source == req.target {
            // dropping a tab back onto its own pane
            return Ok(());
        }
        self.check_drag(req.source, req.tab, req.target)?;
        let doc = self
            .panes
            .get_mut(&req.source)
            .ok_or(WorkspaceError::PaneNotFound(req.source))?
            .take_tab(req.tab)?;
        self.panes
            .get_mut(&req.target)
            .ok_or(WorkspaceError::PaneNotFound(req.target))?
            .insert_doc(doc, None);
        self.focus_pane(req.target)
    }

    fn apply_split(&mut self, req: SplitRequest) -> Result<()> {
        self.check_drag(req.source, req.tab, req.target)?;
        let doc = self
            .panes
            .get_mut(&req.source)
            .ok_or(WorkspaceError::PaneNotFound(req.source))?
            .take_tab(req.tab)?;
        let new_id = PaneId::new_v4();
        self.layout.split(req.target, req.direction, req.side, new_id)?;
        let pane = Pane::new(new_id, TabGroup::with(doc), self.surfaces.create());
        self.panes.insert(new_id, pane);
        self.focus_pane(new_id)
    }

    /// Validate a drag's ids before mutating anything, so a stale
    /// request cannot leave the tree half-changed.
    fn check_drag(&self, source: PaneId, tab: usize, target: PaneId) -> Result<()> {
        let Some(pane) = self.panes.get(&source) else {
            return Err(WorkspaceError::PaneNotFound(source));
        };
        let len = pane.group().tab_count();
        if tab >= len {
            return Err(WorkspaceError::TabIndex { index: tab, len });
        }
        if !self.layout.contains(target) {
            return Err(WorkspaceError::PaneNotFound(target));
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Events from the editing surface
    // -----------------------------------------------------------------

    /// The focused surface's content changed: flag the active document.
    pub fn notify_content_changed(&mut self) {
        let was_dirty = self.active_document().is_dirty();
        self.focused_pane_mut().current_document_mut().mark_dirty();
        if !was_dirty {
            self.emit_title();
        }
    }

    /// Forward a cursor move to the status collaborator.
    pub fn notify_cursor_moved(&mut self, line: usize, col: usize) {
        self.status.cursor_moved(line, col);
    }

    // -----------------------------------------------------------------
    // Session persistence
    // -----------------------------------------------------------------

    /// Snapshot for persistence: paths, layout, active tabs, and focus.
    pub fn snapshot(&self) -> Session {
        Session::from_workspace(self)
    }

    /// Write the current snapshot to the default session file.
    pub fn save_session(&self) -> anyhow::Result<()> {
        store::save(&self.snapshot())
    }

    /// Load and apply the default session file when configured to.
    pub fn restore_startup_session(&mut self) {
        if !self.config.restore_session {
            return;
        }
        if let Some(session) = store::load() {
            self.restore(session);
        }
    }

    /// Rebuild panes and documents from a saved session. Unreadable
    /// paths are skipped with a warning, and a pane whose documents all
    /// fail falls back to a single untitled tab so the layout invariants
    /// hold. A snapshot whose layout and pane list disagree is ignored.
    pub fn restore(&mut self, session: Session) {
        let layout_ids = session.layout.pane_ids();
        let snapshot_ids: Vec<PaneId> = session.panes.iter().map(|pane| pane.id).collect();
        if layout_ids != snapshot_ids {
            tracing::warn!("session layout and pane list disagree, ignoring snapshot");
            return;
        }

        let mut panes = HashMap::new();
        for snap in &session.panes {
            let mut group: Option<TabGroup> = None;
            for path in &snap.tabs {
                let doc = match path {
                    Some(path) => match Document::open(self.fs.as_ref(), path.clone()) {
                        Ok(doc) => doc,
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping session document");
                            continue;
                        }
                    },
                    None => Document::new(),
                };
                match &mut group {
                    Some(group) => {
                        group.insert(doc, None);
                    }
                    None => group = Some(TabGroup::with(doc)),
                }
            }
            let mut group = group.unwrap_or_default();
            let active = snap.active.min(group.tab_count() - 1);
            let _ = group.set_active(active);
            panes.insert(snap.id, Pane::new(snap.id, group, self.surfaces.create()));
        }

        self.layout = session.layout;
        self.panes = panes;
        let focused = if self.panes.contains_key(&session.focused) {
            session.focused
        } else {
            self.layout.first_leaf()
        };
        let _ = self.focus_pane(focused);
        tracing::info!(panes = self.panes.len(), "session restored");
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Save one tab's document, pulling the surface first when it is the
    /// pane's active tab. Untitled documents route into save-as. Returns
    /// whether the document ended up clean on disk.
    fn save_tab(&mut self, pane_id: PaneId, tab: usize) -> bool {
        self.sync_if_active(pane_id, tab);
        let Some(pane) = self.panes.get_mut(&pane_id) else {
            return false;
        };
        let Some(doc) = pane.document_mut(tab) else {
            return false;
        };
        let result = doc.save(self.fs.as_ref());
        match result {
            Ok(()) => {
                self.emit_title();
                true
            }
            Err(WorkspaceError::NoPath) => self.save_tab_as(pane_id, tab),
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Save-as for one tab: prompt for a destination seeded from the
    /// document's path or the dialog start directory.
    fn save_tab_as(&mut self, pane_id: PaneId, tab: usize) -> bool {
        self.sync_if_active(pane_id, tab);
        let suggested = {
            let Some(pane) = self.panes.get(&pane_id) else {
                return false;
            };
            let Some(doc) = pane.group().get(tab) else {
                return false;
            };
            match doc.path() {
                Some(path) => path.to_path_buf(),
                None => self.dialog_start_dir().join(doc.display_name()),
            }
        };
        let Some(path) = self.dialogs.prompt_save_path(&suggested) else {
            return false;
        };
        let Some(pane) = self.panes.get_mut(&pane_id) else {
            return false;
        };
        let Some(doc) = pane.document_mut(tab) else {
            return false;
        };
        let result = doc.save_as(self.fs.as_ref(), path);
        match result {
            Ok(()) => {
                self.emit_title();
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn sync_if_active(&mut self, pane_id: PaneId, tab: usize) {
        if let Some(pane) = self.panes.get_mut(&pane_id) {
            if pane.group().active_index() == tab {
                pane.store_active();
            }
        }
    }

    /// Directory to seed file dialogs with: the active document's
    /// directory, else the configured default, else the platform one.
    fn dialog_start_dir(&self) -> PathBuf {
        if let Some(parent) = self.active_document().path().and_then(Path::parent) {
            return parent.to_path_buf();
        }
        self.config
            .default_directory
            .clone()
            .unwrap_or_else(host::default_directory)
    }

    fn report(&mut self, err: &WorkspaceError) {
        tracing::warn!(error = %err, "operation aborted");
        self.status.notify_error(&err.to_string());
    }

    fn emit_title(&mut self) {
        let title = self.focused_pane().current_document().title();
        self.status.title_changed(&title);
    }
}
