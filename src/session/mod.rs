pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::{LayoutNode, PaneId};
use crate::workspace::Workspace;

/// Bumped when the snapshot shape changes; `store::migrate` upgrades
/// old files on load.
pub const SESSION_VERSION: u32 = 1;

/// A restorable picture of the workspace: the split tree, each pane's
/// tab paths, and where focus was. Document content is not captured;
/// tabs reload from disk and untitled tabs come back empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub updated_at: DateTime<Utc>,
    pub layout: LayoutNode,
    pub panes: Vec<PaneSnapshot>,
    pub focused: PaneId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub id: PaneId,
    /// One entry per tab; `None` marks an untitled document.
    pub tabs: Vec<Option<PathBuf>>,
    pub active: usize,
}

impl Session {
    pub fn from_workspace(workspace: &Workspace) -> Self {
        let mut panes = Vec::new();
        for id in workspace.layout().pane_ids() {
            let Some(pane) = workspace.pane(id) else {
                continue;
            };
            let tabs = pane
                .group()
                .tabs()
                .iter()
                .map(|doc| doc.path().map(Path::to_path_buf))
                .collect();
            panes.push(PaneSnapshot {
                id,
                tabs,
                active: pane.group().active_index(),
            });
        }

        Session {
            version: SESSION_VERSION,
            updated_at: Utc::now(),
            layout: workspace.layout().clone(),
            panes,
            focused: workspace.focused_pane_id(),
        }
    }
}
