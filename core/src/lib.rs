pub mod activation;
pub mod creator;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod types;

pub use error::{CreateError, Error, PlatformError, Result};
pub use types::{EntryKind, EntryName, NameError, Outcome, OutcomeKind};
