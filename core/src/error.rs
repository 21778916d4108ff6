use crate::types::{AppConfigError, NameError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("name error: {0}")]
    Name(#[from] NameError),

    #[error("create error: {0}")]
    Create(#[from] CreateError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("config error: {0}")]
    Config(#[from] AppConfigError),
}

#[derive(Error, Debug)]
pub enum CreateError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("'{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Permission denied: cannot create '{name}' here")]
    PermissionDenied { name: String },

    #[error("Creation failed: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a window-system or shell-automation backend.
///
/// Backends flatten their native error types into messages so this crate stays
/// free of platform bindings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("window query failed: {0}")]
    Window(String),

    #[error("process {pid} could not be inspected: {message}")]
    Process { pid: u32, message: String },

    #[error("shell automation failed: {0}")]
    Automation(String),
}
