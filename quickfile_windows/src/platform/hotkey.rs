//! Global hotkey registration using Win32 RegisterHotKey.
//!
//! Shortcut format: `[Ctrl+][Alt+][Shift+][Win+]<e.code>`
//! where `<e.code>` is the DOM KeyboardEvent.code value (e.g., "KeyN", "Digit1", "F12").
//!
//! Uses the `keycode` crate to convert DOM e.code to Windows scan codes,
//! then `MapVirtualKeyW` to convert scan codes to virtual key codes.

use keycode::{KeyMap, KeyMappingCode};
use thiserror::Error;
use tracing::{debug, warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MAPVK_VSC_TO_VK, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN,
    MapVirtualKeyW, RegisterHotKey, UnregisterHotKey,
};

/// Identifier passed back in the WPARAM of WM_HOTKEY.
pub const HOTKEY_ID: i32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("shortcut is empty")]
    Empty,
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("shortcut names more than one key")]
    MultipleKeys,
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("shortcut must include Ctrl or Alt")]
    MissingModifier,
    #[error("RegisterHotKey failed: {0}")]
    Register(String),
}

/// A parsed keyboard shortcut with modifiers and virtual key code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub modifiers: HOT_KEY_MODIFIERS,
    pub vk_code: u32,
}

impl HotkeyBinding {
    /// Parses a shortcut string like "Ctrl+Alt+KeyN".
    ///
    /// A global shortcut without Ctrl or Alt would swallow ordinary typing,
    /// so such bindings are rejected here.
    pub fn parse(shortcut: &str) -> Result<Self, HotkeyError> {
        let shortcut = shortcut.trim();
        if shortcut.is_empty() {
            return Err(HotkeyError::Empty);
        }

        let mut modifiers = HOT_KEY_MODIFIERS(0);
        let mut key_part: Option<&str> = None;

        for part in shortcut.split('+') {
            let part = part.trim();
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= MOD_CONTROL,
                "alt" => modifiers |= MOD_ALT,
                "shift" => modifiers |= MOD_SHIFT,
                "win" | "meta" | "super" => modifiers |= MOD_WIN,
                "" => return Err(HotkeyError::MissingKey),
                _ => {
                    if key_part.is_some() {
                        return Err(HotkeyError::MultipleKeys);
                    }
                    key_part = Some(part);
                }
            }
        }

        let key = key_part.ok_or(HotkeyError::MissingKey)?;
        let vk_code = code_to_vk(key).ok_or_else(|| HotkeyError::UnknownKey(key.to_string()))?;

        if (modifiers & (MOD_CONTROL | MOD_ALT)).0 == 0 {
            return Err(HotkeyError::MissingModifier);
        }

        Ok(Self { modifiers, vk_code })
    }
}

/// Converts a DOM e.code string to a Windows virtual key code.
fn code_to_vk(code: &str) -> Option<u32> {
    let key_code: KeyMappingCode = code.parse().ok()?;
    let scan_code = KeyMap::from(key_code).win as u32;
    if scan_code == 0 {
        return None;
    }

    let vk = unsafe { MapVirtualKeyW(scan_code, MAPVK_VSC_TO_VK) };
    (vk != 0).then_some(vk)
}

/// Registers `shortcut` as the global activation hotkey for `hwnd`.
pub fn register_global_hotkey(hwnd: HWND, shortcut: &str) -> Result<(), HotkeyError> {
    let binding = HotkeyBinding::parse(shortcut)?;

    // MOD_NOREPEAT: holding the keys down fires once
    let modifiers = binding.modifiers | MOD_NOREPEAT;
    unsafe { RegisterHotKey(Some(hwnd), HOTKEY_ID, modifiers, binding.vk_code) }
        .map_err(|err| HotkeyError::Register(err.to_string()))?;

    debug!(shortcut = shortcut.trim(), "registered global hotkey");
    Ok(())
}

/// Unregisters the activation hotkey. Harmless if it was never registered.
pub fn unregister_global_hotkey(hwnd: HWND) {
    if let Err(err) = unsafe { UnregisterHotKey(Some(hwnd), HOTKEY_ID) } {
        warn!(%err, "UnregisterHotKey failed");
    }
}
