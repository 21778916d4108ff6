//! Fallback directory selection.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the desktop directory under the user's home.
pub const DESKTOP_DIR_NAME: &str = "Desktop";

/// Returns the current user's desktop directory (`<home>/Desktop`).
///
/// Returns `None` only if the home directory cannot be determined.
pub fn desktop_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DESKTOP_DIR_NAME))
}

/// Picks the directory an entry will be created in.
///
/// `resolved` is used only if it is an existing directory right now, since the
/// window it came from may have navigated away or closed. Otherwise
/// `fallback` is returned.
pub fn target_directory(resolved: Option<PathBuf>, fallback: &Path) -> PathBuf {
    match resolved {
        Some(path) if path.is_dir() => path,
        Some(path) => {
            debug!(path = %path.display(), "resolved path is not a directory, using fallback");
            fallback.to_path_buf()
        }
        None => fallback.to_path_buf(),
    }
}
