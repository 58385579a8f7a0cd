//! Error types for workspace, tab-group, and layout operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::layout::PaneId;

/// Errors produced by the workspace core.
///
/// `Io` is recovered at the workspace boundary (the user is notified and
/// the operation aborted); `NoPath` is an internal signal that routes a
/// save into the save-as flow; the remaining variants are contract
/// violations from the command layer and indicate a caller bug.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("i/o on '{}' failed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document has no path")]
    NoPath,

    #[error("tab index {index} out of range (len {len})")]
    TabIndex { index: usize, len: usize },

    #[error("pane {0} not found in layout")]
    PaneNotFound(PaneId),

    #[error("cannot merge out the root pane")]
    CannotMergeRoot,
}

impl WorkspaceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
