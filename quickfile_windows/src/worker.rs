//! Runs one activation on its own thread.
//!
//! The prompt blocks in its own message loop and the shell queries are COM
//! calls, so neither runs on the UI thread that owns the hotkey and tray icon.

use crate::platform::com::ComApartment;
use crate::platform::desktop::Win32Desktop;
use crate::platform::shell::ShellWindowsAutomation;
use crate::platform::{prompt, wm};
use quickfile_core::Outcome;
use quickfile_core::activation::{self, ActivationPermit};
use quickfile_core::resolver::{ActiveDirectoryResolver, FileManagerProfile, WindowHandle};
use quickfile_core::types::AppConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, warn};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::PostMessageW;

pub struct ActivationRequest {
    /// Keeps other activations out until this one has finished.
    pub permit: ActivationPermit,
    /// Window that was in the foreground when the hotkey fired.
    pub foreground: Option<WindowHandle>,
    /// Receives [`wm::ACTIVATION_FINISHED`]. HWND is not `Send`.
    pub notify_hwnd: isize,
    pub config: Arc<AppConfig>,
    pub fallback: PathBuf,
}

/// Starts the activation thread. If the thread cannot start, the permit is
/// dropped with the request and the gate reopens.
pub fn spawn(request: ActivationRequest) {
    let result = thread::Builder::new()
        .name("activation".to_string())
        .spawn(move || run(request));

    if let Err(err) = result {
        error!(%err, "failed to start activation thread");
    }
}

fn run(request: ActivationRequest) {
    let ActivationRequest {
        permit,
        foreground,
        notify_hwnd,
        config,
        fallback,
    } = request;

    let outcome = match activate(foreground, &config, &fallback) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%err, "activation failed");
            None
        }
    };

    // Reopen the gate before the UI thread hears about it
    drop(permit);
    post_outcome(HWND(notify_hwnd as *mut _), outcome);
}

fn activate(
    foreground: Option<WindowHandle>,
    config: &AppConfig,
    fallback: &Path,
) -> windows::core::Result<Option<Outcome>> {
    let _com = ComApartment::init()?;

    let Some(input) = prompt::show(&config.prompt)? else {
        debug!("prompt dismissed");
        return Ok(None);
    };

    let resolver = ActiveDirectoryResolver::new(
        Win32Desktop,
        ShellWindowsAutomation,
        FileManagerProfile::from(&config.resolver),
    );
    Ok(Some(activation::submit(
        &input, &resolver, foreground, fallback,
    )))
}

fn post_outcome(hwnd: HWND, outcome: Option<Outcome>) {
    let ptr = outcome.map_or(std::ptr::null_mut(), |outcome| {
        Box::into_raw(Box::new(outcome))
    });

    let posted = unsafe {
        PostMessageW(
            Some(hwnd),
            wm::ACTIVATION_FINISHED,
            WPARAM(0),
            LPARAM(ptr as isize),
        )
    };

    if let Err(err) = posted {
        warn!(%err, "could not deliver activation outcome");
        if !ptr.is_null() {
            drop(unsafe { Box::from_raw(ptr) });
        }
    }
}
