//! System tray icon, menu and notification balloons.

use crate::platform::wm;
use std::iter::once;
use std::mem::size_of;
use windows::{
    Win32::{
        Foundation::{HWND, POINT},
        UI::{
            Shell::{
                NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_INFO, NIIF_WARNING, NIM_ADD,
                NIM_DELETE, NIM_MODIFY, NOTIFYICONDATAW, Shell_NotifyIconW,
            },
            WindowsAndMessaging::{
                AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, IDI_APPLICATION,
                LoadIconW, MF_GRAYED, MF_SEPARATOR, MF_STRING, SetForegroundWindow,
                TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_RIGHTBUTTON, TrackPopupMenu,
            },
        },
    },
    core::{PCWSTR, Result, w},
};

/// Tray icon ID.
const TRAY_ICON_ID: u32 = 1;

const TOOLTIP: &str = "QuickFile";

/// Tray menu item IDs.
pub const IDM_NEW_ENTRY: u32 = 1001;
pub const IDM_HOTKEY: u32 = 1002;
pub const IDM_EXIT: u32 = 1003;

/// Copies `text` into a fixed-size wide buffer, truncating and NUL-terminating.
fn copy_wide(dest: &mut [u16], text: &str) {
    let Some(capacity) = dest.len().checked_sub(1) else {
        return;
    };
    let mut len = 0;
    for (slot, c) in dest.iter_mut().zip(text.encode_utf16().take(capacity)) {
        *slot = c;
        len += 1;
    }
    dest[len] = 0;
}

fn base_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

/// Adds the tray icon for the window.
pub fn add_tray_icon(hwnd: HWND) -> Result<()> {
    unsafe {
        let mut nid = NOTIFYICONDATAW {
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: wm::TRAY_ICON,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            ..base_data(hwnd)
        };
        copy_wide(&mut nid.szTip, TOOLTIP);

        if Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
            Ok(())
        } else {
            Err(windows::core::Error::from_thread())
        }
    }
}

/// Removes the tray icon.
pub fn remove_tray_icon(hwnd: HWND) {
    let nid = base_data(hwnd);
    unsafe {
        let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
    }
}

/// Shows a balloon notification from the tray icon.
pub fn show_notification(hwnd: HWND, title: &str, message: &str, warning: bool) {
    let mut nid = NOTIFYICONDATAW {
        uFlags: NIF_INFO,
        dwInfoFlags: if warning { NIIF_WARNING } else { NIIF_INFO },
        ..base_data(hwnd)
    };
    copy_wide(&mut nid.szInfoTitle, title);
    copy_wide(&mut nid.szInfo, message);

    unsafe {
        let _ = Shell_NotifyIconW(NIM_MODIFY, &nid);
    }
}

/// Shows the tray context menu. `hotkey_label` describes the activation shortcut.
pub fn show_tray_menu(hwnd: HWND, hotkey_label: &str) {
    unsafe {
        let Ok(hmenu) = CreatePopupMenu() else {
            return;
        };

        let _ = AppendMenuW(
            hmenu,
            MF_STRING,
            IDM_NEW_ENTRY as usize,
            w!("New file or folder..."),
        );

        // Informational only
        let label: Vec<u16> = hotkey_label.encode_utf16().chain(once(0)).collect();
        let _ = AppendMenuW(
            hmenu,
            MF_STRING | MF_GRAYED,
            IDM_HOTKEY as usize,
            PCWSTR(label.as_ptr()),
        );

        let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, None);
        let _ = AppendMenuW(hmenu, MF_STRING, IDM_EXIT as usize, w!("Exit"));

        let mut pt = POINT::default();
        let _ = GetCursorPos(&mut pt);

        // Required to make the menu dismiss when clicking outside
        let _ = SetForegroundWindow(hwnd);

        let _ = TrackPopupMenu(
            hmenu,
            TPM_LEFTALIGN | TPM_BOTTOMALIGN | TPM_RIGHTBUTTON,
            pt.x,
            pt.y,
            None,
            hwnd,
            None,
        );

        let _ = DestroyMenu(hmenu);
    }
}
