pub mod analyze;
pub mod attendees;
pub mod census;
pub mod log;
pub mod version;

use std::path::Path;

use anyhow::Context;
use rollcall_core::{normalize, AttendanceLog, Config};
use rollcall_io::{read_json, read_table, Paths};

/// Explicit path, else the user config file if it exists, else defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match Paths::new().map(|p| p.config_file()) {
            Ok(default) if default.exists() => default,
            _ => return Ok(Config::default()),
        },
    };

    let config: Config = read_json(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Read and normalize a participant log
pub fn load_log(file: &Path, config: &Config) -> anyhow::Result<AttendanceLog> {
    let table =
        read_table(file).with_context(|| format!("failed to read {}", file.display()))?;
    let log = normalize(&table, config)
        .with_context(|| format!("cannot analyze {}", file.display()))?;
    Ok(log)
}
