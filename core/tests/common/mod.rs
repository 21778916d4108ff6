#![allow(dead_code)]

use quickfile_core::PlatformError;
use quickfile_core::resolver::{
    ActiveDirectoryResolver, FileManagerProfile, ProcessIdentity, ShellAutomation, ShellWindow,
    TopLevelWindow, WindowHandle, WindowSystem,
};
use std::path::{Path, PathBuf};

pub const EXPLORER: &str = r"C:\Windows\explorer.exe";
pub const OTHER_APP: &str = r"C:\Program Files\Mail\mail.exe";

/// A desktop of (handle, class, owner executable) windows in z-order.
#[derive(Default)]
pub struct Desktop {
    pub foreground: Option<isize>,
    pub windows: Vec<(isize, &'static str, &'static str)>,
}

impl WindowSystem for Desktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground.map(WindowHandle)
    }

    fn owning_process(&self, window: WindowHandle) -> Result<ProcessIdentity, PlatformError> {
        self.windows
            .iter()
            .find(|(id, _, _)| *id == window.0)
            .map(|(id, _, exe)| ProcessIdentity {
                pid: *id as u32,
                executable: PathBuf::from(exe),
            })
            .ok_or(PlatformError::Window("no such window".to_string()))
    }

    fn top_level_windows(&self) -> Result<Vec<TopLevelWindow>, PlatformError> {
        Ok(self
            .windows
            .iter()
            .map(|(id, class, _)| TopLevelWindow {
                handle: WindowHandle(*id),
                class_name: class.to_string(),
                visible: true,
            })
            .collect())
    }
}

/// Shell windows as (handle, location URL).
#[derive(Default)]
pub struct Shell {
    pub windows: Vec<(isize, String)>,
}

impl ShellAutomation for Shell {
    fn file_manager_windows(&self) -> Result<Vec<ShellWindow>, PlatformError> {
        Ok(self
            .windows
            .iter()
            .map(|(id, url)| ShellWindow {
                handle: WindowHandle(*id),
                location_url: url.clone(),
            })
            .collect())
    }
}

/// Builds a `file:///` URL for a local directory the way the shell reports it.
pub fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let path = path.trim_start_matches('/');
    format!("file:///{}", path.replace(' ', "%20"))
}

pub fn resolver(desktop: Desktop, shell: Shell) -> ActiveDirectoryResolver<Desktop, Shell> {
    ActiveDirectoryResolver::new(desktop, shell, FileManagerProfile::default())
}
