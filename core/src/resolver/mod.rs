//! Resolution of the directory shown in the user's file-manager window.
//!
//! The resolver only knows the fallback order. Window enumeration, process
//! introspection and the shell object model are reached through
//! [`WindowSystem`] and [`ShellAutomation`], so every step can be driven by an
//! in-memory fake.
//!
//! # Order
//! 1. Foreground window, if it belongs to the file-manager process.
//! 2. Its entry in the shell window collection.
//! 3. Otherwise, visible top-level windows with a file-manager class, topmost first.
//! 4. Nothing. Platform failures are treated as misses, never as errors.

mod location;

pub use location::decode_location_url;

use crate::error::PlatformError;
use crate::types::ResolverConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opaque identifier of a top-level window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Process owning a window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub pid: u32,
    pub executable: PathBuf,
}

/// One entry of a desktop window enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopLevelWindow {
    pub handle: WindowHandle,
    pub class_name: String,
    pub visible: bool,
}

/// One browser window exposed by the shell object model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellWindow {
    pub handle: WindowHandle,
    /// Percent-encoded `file://` location, or whatever the shell reports for virtual folders.
    pub location_url: String,
}

/// Window-manager and process queries.
pub trait WindowSystem {
    fn foreground_window(&self) -> Option<WindowHandle>;

    fn owning_process(&self, window: WindowHandle) -> Result<ProcessIdentity, PlatformError>;

    /// All top-level windows in z-order, topmost first.
    fn top_level_windows(&self) -> Result<Vec<TopLevelWindow>, PlatformError>;
}

/// The shell's collection of open file-manager windows.
pub trait ShellAutomation {
    fn file_manager_windows(&self) -> Result<Vec<ShellWindow>, PlatformError>;

    /// Secondary lookup for a window whose location URL is not a file path.
    fn folder_path(&self, _window: WindowHandle) -> Result<Option<PathBuf>, PlatformError> {
        Ok(None)
    }
}

/// Identifies file-manager processes and windows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileManagerProfile {
    /// Executable file name, compared case-insensitively.
    pub executable: String,
    pub window_classes: Vec<String>,
}

impl FileManagerProfile {
    pub fn is_file_manager_executable(&self, executable: &Path) -> bool {
        let path = executable.to_string_lossy();
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();
        file_name.eq_ignore_ascii_case(&self.executable)
    }

    pub fn is_file_manager_class(&self, class_name: &str) -> bool {
        self.window_classes.iter().any(|class| class == class_name)
    }
}

impl Default for FileManagerProfile {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

impl From<&ResolverConfig> for FileManagerProfile {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            executable: config.file_manager_executable.clone(),
            window_classes: config.window_classes.clone(),
        }
    }
}

pub struct ActiveDirectoryResolver<W, S> {
    windows: W,
    shell: S,
    profile: FileManagerProfile,
}

impl<W: WindowSystem, S: ShellAutomation> ActiveDirectoryResolver<W, S> {
    pub fn new(windows: W, shell: S, profile: FileManagerProfile) -> Self {
        Self {
            windows,
            shell,
            profile,
        }
    }

    /// Resolves using the window that is in the foreground right now.
    #[cfg(test)]
    pub(crate) fn resolve(&self) -> Option<PathBuf> {
        self.resolve_from(self.windows.foreground_window())
    }

    /// Resolves using `foreground` as the window the user was looking at.
    ///
    /// Callers that show their own UI first capture the foreground window
    /// before it changes and pass it here.
    pub fn resolve_from(&self, foreground: Option<WindowHandle>) -> Option<PathBuf> {
        // Only a window already looked up in the foreground step is skipped later
        let mut tried = None;
        if let Some(window) = foreground
            && self.is_file_manager_window(window)
        {
            if let Some(path) = self.lookup(&[window]) {
                debug!(?window, path = %path.display(), "resolved foreground file manager");
                return Some(path);
            }
            debug!(?window, "foreground file manager has no usable location");
            tried = Some(window);
        }

        let candidates = self.background_candidates(tried);
        if candidates.is_empty() {
            debug!("no file-manager windows open");
            return None;
        }

        let path = self.lookup(&candidates)?;
        debug!(path = %path.display(), "resolved background file manager");
        Some(path)
    }

    fn is_file_manager_window(&self, window: WindowHandle) -> bool {
        match self.windows.owning_process(window) {
            Ok(process) => self.profile.is_file_manager_executable(&process.executable),
            Err(err) => {
                debug!(?window, %err, "owning process lookup failed");
                false
            }
        }
    }

    fn background_candidates(&self, skip: Option<WindowHandle>) -> Vec<WindowHandle> {
        let windows = match self.windows.top_level_windows() {
            Ok(windows) => windows,
            Err(err) => {
                debug!(%err, "window enumeration failed");
                return Vec::new();
            }
        };

        windows
            .into_iter()
            .filter(|w| w.visible && self.profile.is_file_manager_class(&w.class_name))
            .map(|w| w.handle)
            .filter(|handle| Some(*handle) != skip)
            .collect()
    }

    /// Returns the location of the first of `candidates` that yields one.
    fn lookup(&self, candidates: &[WindowHandle]) -> Option<PathBuf> {
        let shell_windows = match self.shell.file_manager_windows() {
            Ok(windows) => windows,
            Err(err) => {
                debug!(%err, "shell window collection unavailable");
                return None;
            }
        };

        candidates.iter().find_map(|&handle| {
            let entry = shell_windows.iter().find(|w| w.handle == handle)?;
            decode_location_url(&entry.location_url).or_else(|| self.folder_path(handle))
        })
    }

    fn folder_path(&self, window: WindowHandle) -> Option<PathBuf> {
        match self.shell.folder_path(window) {
            Ok(path) => path,
            Err(err) => {
                debug!(?window, %err, "folder lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
