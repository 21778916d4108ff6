//! Explorer's shell window collection behind [`ShellAutomation`].
//!
//! COM must be initialized on the calling thread (see [`ComApartment`]).
//!
//! [`ComApartment`]: crate::platform::com::ComApartment

use quickfile_core::PlatformError;
use quickfile_core::resolver::{ShellAutomation, ShellWindow, WindowHandle};
use std::path::PathBuf;
use tracing::debug;
use windows::Win32::System::Com::{CLSCTX_ALL, CoCreateInstance, CoTaskMemFree, IServiceProvider};
use windows::Win32::UI::Shell::{
    IFolderView, IPersistFolder2, IShellBrowser, IShellItem, IShellWindows, IWebBrowser2,
    SHCreateItemFromIDList, SID_STopLevelBrowser, SIGDN_FILESYSPATH, ShellWindows,
};
use windows::core::{Interface, VARIANT};

fn automation_error(err: windows::core::Error) -> PlatformError {
    PlatformError::Automation(err.to_string())
}

/// Queries the shell on every call, so results are never stale.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellWindowsAutomation;

impl ShellWindowsAutomation {
    fn browsers(&self) -> windows::core::Result<Vec<IWebBrowser2>> {
        let collection: IShellWindows = unsafe { CoCreateInstance(&ShellWindows, None, CLSCTX_ALL)? };
        let count = unsafe { collection.Count()? };

        let mut browsers = Vec::with_capacity(count.max(0) as usize);
        for index in 0..count {
            // Entries can vanish while iterating
            let Ok(item) = (unsafe { collection.Item(&VARIANT::from(index)) }) else {
                continue;
            };
            if let Ok(browser) = item.cast::<IWebBrowser2>() {
                browsers.push(browser);
            }
        }
        Ok(browsers)
    }

    fn browser_for(&self, window: WindowHandle) -> windows::core::Result<Option<IWebBrowser2>> {
        Ok(self
            .browsers()?
            .into_iter()
            .find(|browser| handle_of(browser) == Some(window)))
    }
}

fn handle_of(browser: &IWebBrowser2) -> Option<WindowHandle> {
    unsafe { browser.HWND() }.ok().map(|hwnd| WindowHandle(hwnd.0))
}

impl ShellAutomation for ShellWindowsAutomation {
    fn file_manager_windows(&self) -> Result<Vec<ShellWindow>, PlatformError> {
        let browsers = self.browsers().map_err(automation_error)?;

        let windows = browsers
            .iter()
            .filter_map(|browser| {
                let handle = handle_of(browser)?;
                let location_url = unsafe { browser.LocationURL() }
                    .map(|url| url.to_string())
                    .unwrap_or_default();
                Some(ShellWindow {
                    handle,
                    location_url,
                })
            })
            .collect::<Vec<_>>();

        debug!(count = windows.len(), "listed shell windows");
        Ok(windows)
    }

    fn folder_path(&self, window: WindowHandle) -> Result<Option<PathBuf>, PlatformError> {
        let Some(browser) = self.browser_for(window).map_err(automation_error)? else {
            return Ok(None);
        };
        match current_folder(&browser) {
            Ok(path) => Ok(Some(path)),
            Err(err) => {
                // Virtual folders such as "This PC" have no file-system path
                debug!(?window, %err, "current folder has no file-system path");
                Ok(None)
            }
        }
    }
}

/// Reads the file-system path of the folder shown by `browser` through its
/// active shell view.
fn current_folder(browser: &IWebBrowser2) -> windows::core::Result<PathBuf> {
    unsafe {
        let provider: IServiceProvider = browser.cast()?;
        let shell_browser: IShellBrowser = provider.QueryService(&SID_STopLevelBrowser)?;
        let view = shell_browser.QueryActiveShellView()?;
        let folder_view: IFolderView = view.cast()?;
        let folder: IPersistFolder2 = folder_view.GetFolder()?;

        let pidl = folder.GetCurFolder()?;
        let item: windows::core::Result<IShellItem> = SHCreateItemFromIDList(pidl);
        CoTaskMemFree(Some(pidl as *const _));

        let name = item?.GetDisplayName(SIGDN_FILESYSPATH)?;
        let path = String::from_utf16_lossy(name.as_wide());
        CoTaskMemFree(Some(name.as_ptr() as *const _));

        Ok(PathBuf::from(path))
    }
}
