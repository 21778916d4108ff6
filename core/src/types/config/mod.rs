mod app;

pub use app::{AppConfig, AppConfigError, GeneralConfig, PromptConfig, ResolverConfig};
