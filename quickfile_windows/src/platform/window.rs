//! Hidden main window and message loop.
//!
//! The window is never shown. It owns the global hotkey and the tray icon,
//! and receives activation outcomes from worker threads.

use crate::app::App;
use crate::platform::{handlers, hotkey, single_instance, tray, wm};
use quickfile_core::types::AppConfig;
use tracing::{info, warn};
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, LRESULT, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GWLP_USERDATA,
            GetMessageW, GetWindowLongPtrW, MSG, RegisterClassW, SetWindowLongPtrW,
            TranslateMessage, WM_COMMAND, WM_DESTROY, WM_HOTKEY, WNDCLASSW, WS_EX_TOOLWINDOW,
            WS_POPUP,
        },
    },
    core::{PCWSTR, Result, w},
};

const CLASS_NAME: PCWSTR = w!("QuickFileWindowClass");

/// Runs the application until the user exits from the tray menu.
pub fn run(config: AppConfig) -> Result<()> {
    let Some(_instance_guard) = single_instance::acquire()? else {
        info!("another instance is already running, exiting");
        return Ok(());
    };

    unsafe {
        let instance = GetModuleHandleW(None)?;

        let wc = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: instance.into(),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };

        let atom = RegisterClassW(&wc);
        debug_assert!(atom != 0);

        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            CLASS_NAME,
            w!("QuickFile"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            Some(instance.into()),
            None,
        )?;

        let mut app = App::new(hwnd, config);
        let shortcut = app.config().general.hotkey.clone();
        match hotkey::register_global_hotkey(hwnd, &shortcut) {
            Ok(()) => app.set_hotkey_registered(true),
            Err(err) => warn!(%shortcut, %err, "global hotkey unavailable, use the tray icon"),
        }

        let app_ptr = Box::into_raw(Box::new(app));
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, app_ptr as isize);

        if let Err(err) = tray::add_tray_icon(hwnd) {
            // WM_DESTROY releases the app and the hotkey
            let _ = DestroyWindow(hwnd);
            return Err(err);
        }

        info!(%shortcut, "quickfile running");

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        Ok(())
    }
}

/// Gets the App instance from the window's user data.
///
/// # Safety
///
/// Must be called on the UI thread. The reference is invalid after WM_DESTROY.
pub(crate) unsafe fn get_app(hwnd: HWND) -> Option<&'static App> {
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const App;
        if ptr.is_null() { None } else { Some(&*ptr) }
    }
}

/// Takes the App back out of the window's user data.
pub(crate) unsafe fn take_app(hwnd: HWND) -> Option<Box<App>> {
    unsafe {
        let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut App;
        if ptr.is_null() {
            None
        } else {
            Some(Box::from_raw(ptr))
        }
    }
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match msg {
        WM_HOTKEY => handlers::on_hotkey(hwnd, wparam),
        WM_COMMAND => handlers::on_command(hwnd, wparam),
        WM_DESTROY => handlers::on_destroy(hwnd),
        wm::TRAY_ICON => handlers::on_trayicon(hwnd, lparam),
        wm::ACTIVATION_FINISHED => handlers::on_activation_finished(hwnd, lparam),
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}
