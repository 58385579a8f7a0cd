use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Session, SESSION_VERSION};

fn state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

pub fn state_file_path() -> PathBuf {
    state_dir().join("state.json")
}

pub fn save(session: &Session) -> Result<()> {
    save_to(session, &state_file_path())
}

pub fn load() -> Option<Session> {
    load_from(&state_file_path())
}

// Path-parameterized variants for testability

pub fn save_to(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(session)?;
    fs::write(path, json)?;
    Ok(())
}

/// A missing file is a normal first launch; one that no longer parses
/// is abandoned with a warning rather than blocking startup.
pub fn load_from(path: &Path) -> Option<Session> {
    let json = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Session>(&json) {
        Ok(mut session) => {
            migrate(&mut session);
            Some(session)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "invalid session file, starting fresh"
            );
            None
        }
    }
}

/// Migrate a saved session to the latest version (currently v1).
fn migrate(session: &mut Session) {
    if session.version < SESSION_VERSION {
        session.version = SESSION_VERSION;
    }
}
