use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Config: resolved settings with defaults applied
// ---------------------------------------------------------------------------

/// Workspace behavior knobs, read from `folio/config.toml` under the
/// platform config directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Reload the previous session's layout and documents on startup.
    pub restore_session: bool,
    /// Whether tab cycling wraps past the first and last tab.
    pub wrap_tab_cycling: bool,
    /// Directory file dialogs start in when no open document suggests
    /// one. Falls back to the platform documents folder.
    pub default_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restore_session: true,
            wrap_tab_cycling: true,
            default_directory: None,
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Load the config file. A missing file silently yields the
    /// defaults; a file that does not parse logs a warning and yields
    /// the defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<RawConfig>(&text) {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "invalid config file, using defaults"
                );
                Self::default()
            }
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();
        if let Some(v) = raw.restore_session {
            config.restore_session = v;
        }
        if let Some(v) = raw.wrap_tab_cycling {
            config.wrap_tab_cycling = v;
        }
        if let Some(v) = raw.default_directory {
            config.default_directory = Some(v);
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Raw TOML structures: every field optional so partial files merge over
// the defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    restore_session: Option<bool>,
    wrap_tab_cycling: Option<bool>,
    default_directory: Option<PathBuf>,
}
