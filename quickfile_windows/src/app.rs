//! Application coordinator.

use crate::platform::desktop::Win32Desktop;
use crate::platform::tray;
use crate::worker::{self, ActivationRequest};
use quickfile_core::Outcome;
use quickfile_core::activation::ActivationGate;
use quickfile_core::paths;
use quickfile_core::resolver::WindowSystem;
use quickfile_core::types::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use windows::Win32::Foundation::HWND;

/// Owned by the hidden main window. Lives on the UI thread.
pub struct App {
    hwnd: HWND,
    config: Arc<AppConfig>,
    gate: ActivationGate,
    fallback: PathBuf,
    hotkey_registered: bool,
}

impl App {
    pub fn new(hwnd: HWND, config: AppConfig) -> Self {
        let fallback = fallback_directory(&config);
        debug!(fallback = %fallback.display(), "fallback directory");
        Self {
            hwnd,
            config: Arc::new(config),
            gate: ActivationGate::new(),
            fallback,
            hotkey_registered: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn hotkey_registered(&self) -> bool {
        self.hotkey_registered
    }

    pub fn set_hotkey_registered(&mut self, registered: bool) {
        self.hotkey_registered = registered;
    }

    /// Tray menu label for the activation shortcut.
    pub fn hotkey_label(&self) -> String {
        let hotkey = self.config.general.hotkey.trim();
        if self.hotkey_registered {
            format!("Hotkey: {hotkey}")
        } else {
            format!("Hotkey: {hotkey} (unavailable)")
        }
    }

    /// Starts an activation unless one is already running.
    pub fn activate(&self) {
        if self.gate.is_active() {
            debug!("activation already in progress, ignoring");
            return;
        }

        // Captured before the prompt takes focus
        let foreground = Win32Desktop.foreground_window();

        let Some(permit) = self.gate.try_acquire() else {
            debug!("activation started concurrently, ignoring");
            return;
        };

        debug!(?foreground, "activation started");
        worker::spawn(ActivationRequest {
            permit,
            foreground,
            notify_hwnd: self.hwnd.0 as isize,
            config: Arc::clone(&self.config),
            fallback: self.fallback.clone(),
        });
    }

    /// Presents the outcome of a finished activation. `None` means the prompt was dismissed.
    pub fn finish(&self, outcome: Option<Outcome>) {
        let Some(outcome) = outcome else {
            return;
        };
        if self.config.general.notify_outcome {
            tray::show_notification(
                self.hwnd,
                "QuickFile",
                &outcome.message,
                !outcome.is_success(),
            );
        }
    }
}

fn fallback_directory(config: &AppConfig) -> PathBuf {
    if let Some(dir) = &config.resolver.fallback_directory {
        return dir.clone();
    }
    paths::desktop_dir().unwrap_or_else(|| {
        warn!("home directory unknown, using the temp directory as fallback");
        std::env::temp_dir()
    })
}
