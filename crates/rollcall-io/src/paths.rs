//! Default locations for rollcall files

use std::path::PathBuf;

/// Resolves standard paths for configuration
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_root: PathBuf,
}

impl Paths {
    /// Resolve from the platform config directory
    pub fn new() -> std::io::Result<Self> {
        let config_root = dirs::config_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "config directory not found")
        })?;

        Ok(Self {
            config_root: config_root.join("rollcall"),
        })
    }

    /// Resolve relative to an explicit root (tests, portable installs)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: root.into(),
        }
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.config_root.join("config.json")
    }
}
