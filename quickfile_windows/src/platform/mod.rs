//! Win32 platform layer.

pub mod com;
pub mod desktop;
pub mod handlers;
pub mod hotkey;
pub mod prompt;
pub mod shell;
pub mod single_instance;
pub mod tray;
pub mod window;
pub mod wm;
