use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.general.hotkey.trim().is_empty() {
            errors.push("general.hotkey must not be empty".to_string());
        }

        if self.prompt.width < 1 || self.prompt.height < 1 {
            errors.push("prompt.width and prompt.height must be at least 1".to_string());
        }

        if self.resolver.file_manager_executable.trim().is_empty() {
            errors.push("resolver.file_manager_executable must not be empty".to_string());
        }

        if self
            .resolver
            .window_classes
            .iter()
            .all(|class| class.trim().is_empty())
        {
            errors.push("resolver.window_classes must name at least one class".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();

        if config.general.hotkey.trim().is_empty() {
            config.general.hotkey = defaults.general.hotkey;
        }
        if config.prompt.width < 1 || config.prompt.height < 1 {
            config.prompt.width = defaults.prompt.width;
            config.prompt.height = defaults.prompt.height;
        }
        if config.resolver.file_manager_executable.trim().is_empty() {
            config.resolver.file_manager_executable = defaults.resolver.file_manager_executable;
        }
        config
            .resolver
            .window_classes
            .retain(|class| !class.trim().is_empty());
        if config.resolver.window_classes.is_empty() {
            config.resolver.window_classes = defaults.resolver.window_classes;
        }

        config
    }
}

/// General application settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Global shortcut in `[Ctrl+][Alt+][Shift+][Win+]<KeyboardEvent.code>` form.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Show a tray notification after each activation.
    #[serde(default = "default_true")]
    pub notify_outcome: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            notify_outcome: true,
        }
    }
}

/// Input prompt appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_prompt_width")]
    pub width: i32,
    #[serde(default = "default_prompt_height")]
    pub height: i32,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            width: default_prompt_width(),
            height: default_prompt_height(),
            placeholder: default_placeholder(),
        }
    }
}

/// Which process and window classes count as the file manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_file_manager_executable")]
    pub file_manager_executable: String,
    #[serde(default = "default_window_classes")]
    pub window_classes: Vec<String>,
    /// Used instead of the desktop when no file-manager location is found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_directory: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            file_manager_executable: default_file_manager_executable(),
            window_classes: default_window_classes(),
            fallback_directory: None,
        }
    }
}

fn default_hotkey() -> String {
    "Ctrl+Alt+KeyN".to_string()
}

fn default_prompt_width() -> i32 {
    400
}

fn default_prompt_height() -> i32 {
    50
}

fn default_placeholder() -> String {
    "Name of the file or folder to create".to_string()
}

fn default_file_manager_executable() -> String {
    "explorer.exe".to_string()
}

fn default_window_classes() -> Vec<String> {
    vec!["CabinetWClass".to_string(), "ExploreWClass".to_string()]
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
