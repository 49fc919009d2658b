//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/filebot/filebot.toml`
//! 3. Environment variables: `FILEBOT_*` prefix
//! 4. Command line flags (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_PROMPT};

/// Unified configuration for filebot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prompt shown before each input line
    pub prompt: String,
    /// Directory relative paths resolve against (default: cwd)
    pub working_dir: Option<PathBuf>,
    /// Print the start banner
    pub banner: bool,
    /// Colored output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            working_dir: None,
            banner: true,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub prompt: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub banner: Option<bool>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for filebot.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "filebot").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("filebot.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(dir) = &self.working_dir {
            let expanded = expand_env_vars(dir.to_string_lossy().as_ref());
            self.working_dir = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            prompt: overlay
                .prompt
                .clone()
                .unwrap_or_else(|| self.prompt.clone()),
            working_dir: overlay
                .working_dir
                .clone()
                .or_else(|| self.working_dir.clone()),
            banner: overlay.banner.unwrap_or(self.banner),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with an explicit global config file.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply FILEBOT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FILEBOT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("prompt") {
            settings.prompt = val;
        }
        if let Ok(val) = config.get_string("working_dir") {
            settings.working_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("banner") {
            settings.banner = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
