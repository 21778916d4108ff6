//! Name classification and legality checks for new entries.

use nutype::nutype;
use std::fmt;
use thiserror::Error;

/// Characters that may not appear in an entry name.
pub const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name contains illegal character: {0}")]
    IllegalCharacter(char),
}

/// What a name will be created as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "folder"),
        }
    }
}

/// Classifies a name as a file or a directory.
///
/// A name is a file if it has a `.` that is neither its first nor its last
/// character. Everything else, including `.gitignore` and `name.`, is a
/// directory.
pub fn classify(name: &str) -> EntryKind {
    let last = name.len().saturating_sub(1);
    let has_extension = name
        .char_indices()
        .any(|(i, c)| c == '.' && i != 0 && i != last);
    if has_extension {
        EntryKind::File
    } else {
        EntryKind::Directory
    }
}

/// Returns the leftmost reserved character in `name`, if any.
pub fn find_reserved_char(name: &str) -> Option<char> {
    name.chars().find(|c| RESERVED_CHARS.contains(c))
}

/// Fails with the leftmost reserved character in `name`.
///
/// Device names (`CON`, `NUL`, ...) and length limits are not checked.
pub fn check_legal(name: &str) -> Result<(), NameError> {
    match find_reserved_char(name) {
        Some(c) => Err(NameError::IllegalCharacter(c)),
        None => Ok(()),
    }
}

fn validate_entry_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    check_legal(name)
}

/// A trimmed, non-empty name free of reserved characters.
#[nutype(
    sanitize(trim),
    validate(with = validate_entry_name, error = NameError),
    derive(
        Debug, Clone, PartialEq, Eq, Hash, AsRef, Deref, TryFrom, Into, Display,
    )
)]
pub struct EntryName(String);

impl EntryName {
    /// The kind this name will be created as.
    pub fn kind(&self) -> EntryKind {
        classify(self.as_ref())
    }
}
