//! Location and loading of the on-disk configuration.

use quickfile_core::types::AppConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Overrides the data directory, mainly for development.
pub const DATA_DIR_ENV: &str = "QUICKFILE_DATA_DIR";

/// `%QUICKFILE_DATA_DIR%`, or `%LOCALAPPDATA%\quickfile`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("quickfile")
}

/// Loads `config.toml` from `data_dir`.
///
/// Never fails: a missing file is written out with defaults, an unreadable one
/// is replaced by defaults in memory, and invalid fields are reset.
pub fn load_config(data_dir: &Path) -> AppConfig {
    let path = AppConfig::path(data_dir);

    let config = match read_or_create(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), %err, "config unusable, using defaults");
            return AppConfig::default();
        }
    };

    let problems = config.validate();
    if problems.is_empty() {
        return config;
    }
    for problem in &problems {
        warn!(path = %path.display(), "{problem}");
    }
    config.with_defaults_for_invalid()
}

/// Reads the config file, writing the defaults out first if there is none.
fn read_or_create(path: &Path) -> quickfile_core::Result<AppConfig> {
    let config = AppConfig::load(path)?;
    if !path.exists() {
        config.save(path)?;
        info!(path = %path.display(), "wrote default config");
    }
    Ok(config)
}
