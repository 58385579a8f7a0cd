//! Collaborator boundary: everything the workspace core needs from its
//! embedding application, expressed as traits so the core stays free of
//! any UI toolkit.

use std::io;
use std::path::{Path, PathBuf};

/// Outcome of the save-changes prompt for one dirty document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Saved,
    Discarded,
    Cancelled,
}

/// One visible text-editing widget. The workspace pushes and pulls whole
/// buffers at sync points (tab switch, save, quit); incremental editing
/// stays inside the surface.
pub trait EditorSurface {
    fn content(&self) -> String;
    fn set_content(&mut self, text: &str);
}

/// Creates one editing surface per pane.
pub trait SurfaceFactory {
    fn create(&mut self) -> Box<dyn EditorSurface>;
}

/// File access used by document open and save.
pub trait FileSystem {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Modal prompts presented by the UI layer. `None` from the path prompts
/// means the user dismissed the chooser.
pub trait DialogService {
    fn prompt_save_changes(&mut self, doc_name: &str) -> ConfirmOutcome;
    fn prompt_open_path(&mut self, start_dir: &Path) -> Option<PathBuf>;
    fn prompt_save_path(&mut self, suggested: &Path) -> Option<PathBuf>;
}

/// Non-blocking status outputs: error notifications, cursor position for
/// a status bar, and window-title updates.
pub trait StatusSink {
    fn notify_error(&mut self, message: &str);
    fn cursor_moved(&mut self, line: usize, col: usize);
    fn title_changed(&mut self, title: &str);
}

/// The full set of collaborators handed to a workspace at construction.
pub struct Host {
    pub fs: Box<dyn FileSystem>,
    pub dialogs: Box<dyn DialogService>,
    pub status: Box<dyn StatusSink>,
    pub surfaces: Box<dyn SurfaceFactory>,
}

/// Directory that file dialogs start in when no document suggests one:
/// the platform documents folder if it exists, else the home directory.
pub fn default_directory() -> PathBuf {
    dirs::document_dir()
        .filter(|dir| dir.is_dir())
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `FileSystem` backed by `std::fs`.
pub struct NativeFileSystem;

impl FileSystem for NativeFileSystem {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Plain in-memory `EditorSurface` for embedders without a widget per
/// pane, and for tests.
#[derive(Default)]
pub struct BufferSurface {
    text: String,
}

impl EditorSurface for BufferSurface {
    fn content(&self) -> String {
        self.text.clone()
    }

    fn set_content(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Factory producing `BufferSurface`s.
#[derive(Default)]
pub struct BufferSurfaceFactory;

impl SurfaceFactory for BufferSurfaceFactory {
    fn create(&mut self) -> Box<dyn EditorSurface> {
        Box::new(BufferSurface::default())
    }
}
