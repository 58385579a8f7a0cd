use std::path::{Path, PathBuf};

use crate::error::{Result, WorkspaceError};
use crate::host::FileSystem;
use crate::language;

/// One open file: its path (`None` for new, unsaved documents), its
/// dirty flag, and the canonical content buffer. The pane currently
/// displaying the document holds a working copy in its editing surface;
/// this buffer is brought back in sync on tab switch, save, and quit.
#[derive(Debug)]
pub struct Document {
    path: Option<PathBuf>,
    dirty: bool,
    content: String,
}

impl Document {
    /// A fresh untitled document: no path, clean, empty.
    pub fn new() -> Self {
        Self {
            path: None,
            dirty: false,
            content: String::new(),
        }
    }

    /// Read `path` through the file-system collaborator. Checking the
    /// outgoing tab for unsaved changes is the caller's job.
    pub fn open(fs: &dyn FileSystem, path: PathBuf) -> Result<Self> {
        let content = fs
            .read(&path)
            .map_err(|source| WorkspaceError::io(path.clone(), source))?;
        Ok(Self {
            path: Some(path),
            dirty: false,
            content,
        })
    }

    /// Write the content back to the document's own path. Fails with
    /// `NoPath` for untitled documents; the caller then runs save-as.
    pub fn save(&mut self, fs: &dyn FileSystem) -> Result<()> {
        let path = self.path.as_ref().ok_or(WorkspaceError::NoPath)?;
        fs.write(path, &self.content)
            .map_err(|source| WorkspaceError::io(path.clone(), source))?;
        self.dirty = false;
        Ok(())
    }

    /// Write the content to `new_path` and adopt it as the document's
    /// path. The only way an untitled document becomes clean.
    pub fn save_as(&mut self, fs: &dyn FileSystem, new_path: PathBuf) -> Result<()> {
        fs.write(&new_path, &self.content)
            .map_err(|source| WorkspaceError::io(new_path.clone(), source))?;
        self.path = Some(new_path);
        self.dirty = false;
        Ok(())
    }

    /// Flag unsaved changes. Called on every content mutation; idempotent.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replace the canonical buffer at a sync point. Does not touch the
    /// dirty flag: divergence was already flagged by `mark_dirty` when
    /// the edit happened.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when nothing distinguishes this document from a fresh one,
    /// so an open may reuse its tab instead of adding another.
    pub fn is_blank(&self) -> bool {
        self.path.is_none() && !self.dirty && self.content.is_empty()
    }

    /// Final path component, or "Untitled" for pathless documents.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Tab and window title: the display name plus a dirty marker.
    pub fn title(&self) -> String {
        if self.dirty {
            format!("{} *", self.display_name())
        } else {
            self.display_name()
        }
    }

    /// Detected language identifier for status display.
    pub fn language(&self) -> Option<&'static str> {
        language::detect(self.path.as_deref())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
