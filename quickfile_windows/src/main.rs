//! QuickFile Windows application.
//!
//! A tray-resident hotkey listener that creates a file or folder in the
//! Explorer window the user was looking at.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod logging;
mod storage;

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod platform;
#[cfg(windows)]
mod worker;

#[cfg(windows)]
fn main() -> windows::core::Result<()> {
    let data_dir = storage::data_dir();
    logging::init(Some(&data_dir));

    let config = storage::load_config(&data_dir);
    platform::window::run(config)
}

#[cfg(not(windows))]
fn main() {
    let data_dir = storage::data_dir();
    logging::init(None);

    let config = storage::load_config(&data_dir);
    tracing::error!(
        hotkey = %config.general.hotkey,
        "quickfile needs the Windows shell and cannot run on this platform"
    );
    std::process::exit(1);
}
