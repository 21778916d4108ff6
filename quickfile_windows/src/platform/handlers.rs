//! Window message handlers.

use crate::platform::hotkey::{HOTKEY_ID, unregister_global_hotkey};
use crate::platform::tray::{IDM_EXIT, IDM_NEW_ENTRY, remove_tray_icon, show_tray_menu};
use crate::platform::window::{get_app, take_app};
use quickfile_core::Outcome;
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::WindowsAndMessaging::{
        PostMessageW, PostQuitMessage, WM_CLOSE, WM_LBUTTONUP, WM_RBUTTONUP,
    },
};

/// WM_HOTKEY: Start an activation.
pub fn on_hotkey(hwnd: HWND, wparam: WPARAM) -> LRESULT {
    if wparam.0 == HOTKEY_ID as usize
        && let Some(app) = unsafe { get_app(hwnd) }
    {
        app.activate();
    }
    LRESULT(0)
}

/// Tray icon callback: left click activates, right click opens the menu.
pub fn on_trayicon(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    // Low word of lparam contains the mouse message
    let mouse_msg = (lparam.0 & 0xFFFF) as u32;
    let Some(app) = (unsafe { get_app(hwnd) }) else {
        return LRESULT(0);
    };

    if mouse_msg == WM_LBUTTONUP {
        app.activate();
    } else if mouse_msg == WM_RBUTTONUP {
        show_tray_menu(hwnd, &app.hotkey_label());
    }
    LRESULT(0)
}

/// WM_COMMAND: Handle menu commands from tray context menu.
pub fn on_command(hwnd: HWND, wparam: WPARAM) -> LRESULT {
    let cmd_id = (wparam.0 & 0xFFFF) as u32;
    match cmd_id {
        IDM_NEW_ENTRY => {
            if let Some(app) = unsafe { get_app(hwnd) } {
                app.activate();
            }
        }
        IDM_EXIT => unsafe {
            let _ = PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0));
        },
        _ => {}
    }
    LRESULT(0)
}

/// ACTIVATION_FINISHED: Take ownership of the worker's outcome and present it.
pub fn on_activation_finished(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let ptr = lparam.0 as *mut Outcome;
    let outcome = (!ptr.is_null()).then(|| *unsafe { Box::from_raw(ptr) });

    if let Some(app) = unsafe { get_app(hwnd) } {
        app.finish(outcome);
    }
    LRESULT(0)
}

/// WM_DESTROY: Release the hotkey, tray icon and app, then exit the loop.
pub fn on_destroy(hwnd: HWND) -> LRESULT {
    if let Some(app) = unsafe { take_app(hwnd) }
        && app.hotkey_registered()
    {
        unregister_global_hotkey(hwnd);
    }
    remove_tray_icon(hwnd);
    unsafe { PostQuitMessage(0) };
    LRESULT(0)
}
