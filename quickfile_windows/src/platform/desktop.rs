//! Win32 window and process queries behind [`WindowSystem`].

use quickfile_core::PlatformError;
use quickfile_core::resolver::{ProcessIdentity, TopLevelWindow, WindowHandle, WindowSystem};
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use windows::Win32::Foundation::{CloseHandle, HWND, LPARAM, TRUE};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetForegroundWindow, GetWindowThreadProcessId, IsWindowVisible,
};
use windows::core::{BOOL, PWSTR};

/// Long enough for `\\?\` paths.
const IMAGE_PATH_CAPACITY: usize = 32_768;

pub fn to_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

pub fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut _)
}

/// The live desktop of the current session.
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Desktop;

impl WindowSystem for Win32Desktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| to_handle(hwnd))
    }

    fn owning_process(&self, window: WindowHandle) -> Result<ProcessIdentity, PlatformError> {
        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(to_hwnd(window), Some(&mut pid)) };
        if pid == 0 {
            return Err(PlatformError::Window(format!(
                "window {:#x} has no owning process",
                window.0
            )));
        }

        let executable = image_path(pid).map_err(|err| PlatformError::Process {
            pid,
            message: err.to_string(),
        })?;
        Ok(ProcessIdentity { pid, executable })
    }

    fn top_level_windows(&self) -> Result<Vec<TopLevelWindow>, PlatformError> {
        let mut windows: Vec<TopLevelWindow> = Vec::new();
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut windows as *mut Vec<TopLevelWindow> as isize),
            )
        }
        .map_err(|err| PlatformError::Window(err.to_string()))?;
        Ok(windows)
    }
}

/// EnumWindows callback. Visits windows topmost first.
unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<TopLevelWindow>) };

    let mut class = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut class) }.max(0) as usize;

    windows.push(TopLevelWindow {
        handle: to_handle(hwnd),
        class_name: String::from_utf16_lossy(&class[..len]),
        visible: unsafe { IsWindowVisible(hwnd) }.as_bool(),
    });
    TRUE
}

fn image_path(pid: u32) -> windows::core::Result<PathBuf> {
    unsafe {
        let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid)?;

        let mut buffer = vec![0u16; IMAGE_PATH_CAPACITY];
        let mut len = buffer.len() as u32;
        let result = QueryFullProcessImageNameW(
            process,
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        );
        let _ = CloseHandle(process);
        result?;

        Ok(PathBuf::from(OsString::from_wide(&buffer[..len as usize])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_round_trips_through_hwnd() {
        let handle = WindowHandle(0x1234);
        assert_eq!(to_handle(to_hwnd(handle)), handle);
    }

    #[test]
    fn own_process_image_is_found() {
        let pid = std::process::id();
        let path = image_path(pid).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert!(
            path.file_name()
                .unwrap()
                .eq_ignore_ascii_case(exe.file_name().unwrap())
        );
    }
}
