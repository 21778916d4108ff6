//! Custom window messages (WM_APP + N).
use windows::Win32::UI::WindowsAndMessaging::WM_APP;

/// Posted by the activation worker when it is done.
/// LPARAM contains a Box<Outcome> pointer, or 0 if the prompt was dismissed.
pub const ACTIVATION_FINISHED: u32 = WM_APP + 1;

/// Tray icon callback. LPARAM low word is the mouse message.
pub const TRAY_ICON: u32 = WM_APP + 2;
