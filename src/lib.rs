//! Multi-document tab-and-split workspace model for text editors.
//!
//! The crate keeps the bookkeeping of a tabbed, splittable editing
//! surface out of the UI layer: documents and their dirty state, tab
//! groups that are never empty, a binary split tree of panes, and a
//! workspace orchestrator that runs the save/discard/cancel protocol
//! in front of every destructive operation. The embedding application
//! supplies the actual editor widget, file dialogs, and status output
//! through the traits in [`host`].

pub mod config;
pub mod document;
pub mod drag;
pub mod error;
pub mod host;
pub mod language;
pub mod layout;
pub mod pane;
pub mod session;
pub mod tab_group;
pub mod workspace;

pub use config::Config;
pub use document::Document;
pub use drag::{resolve_drop, zone_at, DropCommand, DropZone, MoveTabRequest, SplitRequest};
pub use error::{Result, WorkspaceError};
pub use host::{
    default_directory, BufferSurface, BufferSurfaceFactory, ConfirmOutcome, DialogService,
    EditorSurface, FileSystem, Host, NativeFileSystem, StatusSink, SurfaceFactory,
};
pub use layout::{FocusDirection, LayoutNode, PaneId, Side, SplitDirection, MIN_RATIO};
pub use pane::Pane;
pub use session::{PaneSnapshot, Session, SESSION_VERSION};
pub use tab_group::TabGroup;
pub use workspace::{ConfirmResolution, Workspace};
