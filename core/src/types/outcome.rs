use crate::creator::CreatedEntry;
use crate::error::CreateError;
use crate::types::{EntryKind, NameError};
use std::fmt;

/// What happened to one activation, independent of how the UI shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    Created(EntryKind),
    InvalidName,
    AlreadyExists,
    PermissionDenied,
    Failed,
}

/// Result of one activation: a kind plus a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Created(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&CreatedEntry> for Outcome {
    fn from(entry: &CreatedEntry) -> Self {
        Self {
            kind: OutcomeKind::Created(entry.kind),
            message: format!("Created {} '{}'", entry.kind, entry.name),
        }
    }
}

impl From<&CreateError> for Outcome {
    fn from(err: &CreateError) -> Self {
        let kind = match err {
            CreateError::EmptyName => OutcomeKind::InvalidName,
            CreateError::AlreadyExists { .. } => OutcomeKind::AlreadyExists,
            CreateError::PermissionDenied { .. } => OutcomeKind::PermissionDenied,
            CreateError::Io { .. } => OutcomeKind::Failed,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<&NameError> for Outcome {
    fn from(err: &NameError) -> Self {
        Self {
            kind: OutcomeKind::InvalidName,
            message: err.to_string(),
        }
    }
}

impl From<Result<CreatedEntry, CreateError>> for Outcome {
    fn from(result: Result<CreatedEntry, CreateError>) -> Self {
        match &result {
            Ok(entry) => entry.into(),
            Err(err) => err.into(),
        }
    }
}
