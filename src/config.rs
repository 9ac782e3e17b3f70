//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Target karabiner.json path; defaults to the engine's well-known
    /// location when unset
    pub karabiner_config: Option<PathBuf>,
    /// Layer document used when the command line names none
    pub layers_file: Option<PathBuf>,
}

/// Profile settings written into the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Profile display name
    pub name: String,
    /// Engine menu-bar icon flag
    pub show_in_menu_bar: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            show_in_menu_bar: true,
        }
    }
}

/// Build behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Back up an existing karabiner.json before overwriting it
    pub backups: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { backups: true }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/hyperforge/config.toml`
/// - macOS: `~/Library/Application Support/hyperforge/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Output profile settings
    pub profile: ProfileConfig,
    /// Build behavior
    pub build: BuildConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Checks if the configuration has been set up.
    ///
    /// A config is considered "configured" once a default layers file is
    /// set, so `hyperforge build` works without arguments.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.paths.layers_file.is_some()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("hyperforge");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves the output path for the generated document.
    ///
    /// Falls back to the engine's well-known location,
    /// `~/.config/karabiner/karabiner.json`.
    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.paths.karabiner_config {
            return Ok(path.clone());
        }

        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".config").join("karabiner").join("karabiner.json"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.profile.name.trim().is_empty() {
            anyhow::bail!("Profile name must not be empty");
        }

        Ok(())
    }
}
