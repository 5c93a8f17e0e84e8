use anyhow::Result;
use dirs;
use std::path::{Path, PathBuf};

/// Get the base path override from the environment, if set. Used by tests and
/// by people who want the whole state tree somewhere non-standard.
pub fn env_base_path() -> Option<PathBuf> {
    std::env::var("ANIVAULT_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("anivault");

        Ok(Self::from_base(base_dir))
    }

    /// Build the standard layout under an explicit base: config files at base
    /// level, data/logs in subdirs.
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Directory holding the profile slot files (history.json, bookmarks.json, ...).
    pub fn profile_dir(&self) -> PathBuf {
        self.data_dir.join("profile")
    }

    /// Quarantine target for slot files that failed to parse.
    pub fn damaged_dir(&self) -> PathBuf {
        self.data_dir.join("damaged")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn watch_log_file(&self) -> PathBuf {
        self.log_dir.join("anivault.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.profile_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Explicit override wins over platform-specific paths
        // (e.g. ~/.config/anivault on Linux).
        if let Some(base) = env_base_path() {
            return Self::from_base(base);
        }

        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".anivault")))
    }
}
