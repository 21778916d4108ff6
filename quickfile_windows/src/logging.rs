//! Tracing subscriber setup.
//!
//! Logs go to stderr and, when a data directory is given, to
//! `<data_dir>/quickfile.log`. Release builds have no console, so the file
//! is the only place they show up.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "quickfile.log";

/// Default filter: our crates at debug in dev builds, info otherwise.
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "quickfile=debug,info"
    } else {
        "quickfile=info,warn"
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(data_dir: Option<&Path>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let file_layer = data_dir.and_then(open_log_file).map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .with(file_layer)
        .try_init();

    if let Err(err) = result {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

fn open_log_file(data_dir: &Path) -> Option<File> {
    if let Err(err) = fs::create_dir_all(data_dir) {
        eprintln!("cannot create {}: {err}", data_dir.display());
        return None;
    }
    let path = data_dir.join(LOG_FILE_NAME);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("cannot open {}: {err}", path.display());
            None
        }
    }
}
