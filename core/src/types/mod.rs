pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, GeneralConfig, PromptConfig, ResolverConfig};

pub(crate) mod name;
pub use name::{
    EntryKind, EntryName, NameError, RESERVED_CHARS, check_legal, classify, find_reserved_char,
};

pub(crate) mod outcome;
pub use outcome::{Outcome, OutcomeKind};
