//! The name prompt: a small borderless topmost window holding one EDIT control.
//!
//! [`show`] runs its own message loop on the calling thread and returns once
//! the prompt closes. Enter confirms. Escape, closing, or switching to another
//! window dismisses it.

use quickfile_core::types::PromptConfig;
use std::cell::RefCell;
use std::iter::once;
use std::sync::Once;
use tracing::warn;
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{COLOR_WINDOW, DEFAULT_GUI_FONT, GetStockObject, GetSysColorBrush},
        System::{
            LibraryLoader::GetModuleHandleW,
            Threading::{AttachThreadInput, GetCurrentThreadId},
        },
        UI::{
            Controls::EM_SETCUEBANNER,
            Input::KeyboardAndMouse::{SetFocus, VK_ESCAPE, VK_RETURN},
            Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
            WindowsAndMessaging::{
                BringWindowToTop, CreateWindowExW, DefWindowProcW, DestroyWindow,
                DispatchMessageW, ES_AUTOHSCROLL, GetClientRect, GetForegroundWindow,
                GetMessageW, GetParent, GetSystemMetrics, GetWindowTextLengthW, GetWindowTextW,
                GetWindowThreadProcessId, IDC_ARROW, LoadCursorW, MSG, PostQuitMessage,
                RegisterClassW, SM_CXSCREEN, SM_CYSCREEN, SW_SHOW, SendMessageW,
                SetForegroundWindow, ShowWindow, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE,
                WM_ACTIVATE, WM_CHAR, WM_CLOSE, WM_DESTROY, WM_KEYDOWN, WM_NCDESTROY, WM_SETFONT,
                WNDCLASSW, WS_BORDER, WS_CHILD, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
                WS_TABSTOP, WS_VISIBLE,
            },
        },
    },
    core::{PCWSTR, Result, w},
};

const CLASS_NAME: PCWSTR = w!("QuickFilePrompt");
const EDIT_SUBCLASS_ID: usize = 1;
const PADDING: i32 = 5;

static REGISTER_CLASS: Once = Once::new();

#[derive(Default)]
struct PromptState {
    finished: bool,
    text: Option<String>,
}

thread_local! {
    static STATE: RefCell<PromptState> = RefCell::default();
}

/// Shows the prompt and blocks until it closes.
///
/// Returns the entered text if the user pressed Enter, `None` if the prompt
/// was dismissed.
pub fn show(config: &PromptConfig) -> Result<Option<String>> {
    STATE.with(|state| *state.borrow_mut() = PromptState::default());

    unsafe {
        let instance = GetModuleHandleW(None)?;

        REGISTER_CLASS.call_once(|| {
            let wc = WNDCLASSW {
                lpfnWndProc: Some(prompt_proc),
                hInstance: instance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                hbrBackground: GetSysColorBrush(COLOR_WINDOW),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                warn!("RegisterClassW failed for the prompt window");
            }
        });

        // Center on the primary screen
        let x = (GetSystemMetrics(SM_CXSCREEN) - config.width) / 2;
        let y = (GetSystemMetrics(SM_CYSCREEN) - config.height) / 2;

        let hwnd = CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            CLASS_NAME,
            w!("QuickFile"),
            WS_POPUP | WS_BORDER,
            x,
            y,
            config.width,
            config.height,
            None,
            None,
            Some(instance.into()),
            None,
        )?;

        let mut client = RECT::default();
        let _ = GetClientRect(hwnd, &mut client);

        let edit = match CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            w!("EDIT"),
            w!(""),
            WS_CHILD | WS_VISIBLE | WS_TABSTOP | WINDOW_STYLE(ES_AUTOHSCROLL as u32),
            PADDING,
            PADDING,
            (client.right - 2 * PADDING).max(1),
            (client.bottom - 2 * PADDING).max(1),
            Some(hwnd),
            None,
            Some(instance.into()),
            None,
        ) {
            Ok(edit) => edit,
            Err(err) => {
                let _ = DestroyWindow(hwnd);
                return Err(err);
            }
        };

        let font = GetStockObject(DEFAULT_GUI_FONT);
        let _ = SendMessageW(
            edit,
            WM_SETFONT,
            Some(WPARAM(font.0 as usize)),
            Some(LPARAM(1)),
        );

        // Keep the buffer alive until SendMessageW returns
        let placeholder: Vec<u16> = config.placeholder.encode_utf16().chain(once(0)).collect();
        let _ = SendMessageW(
            edit,
            EM_SETCUEBANNER,
            Some(WPARAM(1)),
            Some(LPARAM(placeholder.as_ptr() as isize)),
        );

        let _ = SetWindowSubclass(edit, Some(edit_subclass_proc), EDIT_SUBCLASS_ID, 0);

        // SetFocus must come after the window is shown and foreground
        let _ = ShowWindow(hwnd, SW_SHOW);
        force_foreground(hwnd);
        let _ = SetFocus(Some(edit));

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    Ok(STATE.with(|state| state.borrow_mut().text.take()))
}

/// Brings `hwnd` to the foreground even though the hotkey gave focus to no
/// window of ours.
///
/// Windows only lets the thread owning the foreground window hand focus
/// away, so input is briefly attached to that thread.
fn force_foreground(hwnd: HWND) {
    unsafe {
        let foreground = GetForegroundWindow();
        let foreground_thread = GetWindowThreadProcessId(foreground, None);
        let current_thread = GetCurrentThreadId();

        let attached = foreground_thread != 0
            && foreground_thread != current_thread
            && AttachThreadInput(current_thread, foreground_thread, true).as_bool();

        let _ = BringWindowToTop(hwnd);
        let _ = SetForegroundWindow(hwnd);

        if attached {
            let _ = AttachThreadInput(current_thread, foreground_thread, false);
        }
    }
}

/// Records the result on the first call and closes the prompt.
fn finish(hwnd: HWND, text: Option<String>) {
    let first = STATE.with(|state| {
        let mut state = state.borrow_mut();
        if state.finished {
            return false;
        }
        state.finished = true;
        state.text = text;
        true
    });

    if first {
        let _ = unsafe { DestroyWindow(hwnd) };
    }
}

fn window_text(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd).max(0) as usize;
        let mut buffer = vec![0u16; len + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer).max(0) as usize;
        String::from_utf16_lossy(&buffer[..copied])
    }
}

extern "system" fn prompt_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_ACTIVATE => {
                // Low word 0 (WA_INACTIVE): the user switched away
                if (wparam.0 & 0xFFFF) == 0 {
                    finish(hwnd, None);
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            WM_CLOSE => {
                finish(hwnd, None);
                LRESULT(0)
            }
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// Subclass procedure for the EDIT control: Enter confirms, Escape dismisses.
unsafe extern "system" fn edit_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _uid_subclass: usize,
    _dw_ref_data: usize,
) -> LRESULT {
    unsafe {
        match msg {
            WM_KEYDOWN => {
                let key = wparam.0 as u16;
                if key != VK_RETURN.0 && key != VK_ESCAPE.0 {
                    return DefSubclassProc(hwnd, msg, wparam, lparam);
                }
                let Ok(prompt) = GetParent(hwnd) else {
                    return DefSubclassProc(hwnd, msg, wparam, lparam);
                };
                let text = (key == VK_RETURN.0).then(|| window_text(hwnd));
                finish(prompt, text);
                LRESULT(0)
            }
            // Single-line EDIT beeps on these
            WM_CHAR if matches!(wparam.0, 0x0D | 0x1B) => LRESULT(0),
            WM_NCDESTROY => {
                let _ = RemoveWindowSubclass(hwnd, Some(edit_subclass_proc), EDIT_SUBCLASS_ID);
                DefSubclassProc(hwnd, msg, wparam, lparam)
            }
            _ => DefSubclassProc(hwnd, msg, wparam, lparam),
        }
    }
}
