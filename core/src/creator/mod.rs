//! Creates a new file or folder under a base directory.
//!
//! Creation is strictly create-new: an existing leaf is never overwritten or
//! merged into. Missing intermediate parents are created as needed.

use crate::error::CreateError;
use crate::types::{EntryKind, classify};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An entry that was just created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Creates `name` under `base_directory` as a file or a folder.
///
/// The name is trimmed and must be non-empty. Reserved characters are not
/// re-checked here; callers validate with [`check_legal`](crate::types::check_legal)
/// or [`EntryName`](crate::types::EntryName) first.
pub fn create(base_directory: &Path, name: &str) -> Result<CreatedEntry, CreateError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CreateError::EmptyName);
    }

    let path = base_directory.join(name);
    if path.symlink_metadata().is_ok() {
        return Err(CreateError::AlreadyExists {
            name: name.to_string(),
        });
    }

    let kind = classify(name);
    let result = match kind {
        EntryKind::File => create_file(&path),
        EntryKind::Directory => create_directory(&path),
    };

    result.map_err(|source| map_io_error(name, source))?;
    debug!(path = %path.display(), %kind, "entry created");

    Ok(CreatedEntry {
        path,
        name: name.to_string(),
        kind,
    })
}

fn create_file(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().write(true).create_new(true).open(path)?;
    Ok(())
}

fn create_directory(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::create_dir(path)
}

fn map_io_error(name: &str, source: io::Error) -> CreateError {
    let name = name.to_string();
    match source.kind() {
        io::ErrorKind::AlreadyExists => CreateError::AlreadyExists { name },
        io::ErrorKind::PermissionDenied => CreateError::PermissionDenied { name },
        _ => CreateError::Io { name, source },
    }
}
