//! Persisted settings: one TOML file under the platform config directory.
//!
//! Saves are atomic (temp file, fsync, rename) so a crash mid-write can
//! never leave a half-written config behind.

use crate::{
    AppError, AppResult,
    config::{CommandRecord, NotifyConfig, TrayConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Notification and alert settings.
    #[serde(default)]
    pub notifications: NotifyConfig,
    /// Tray indicator settings.
    #[serde(default)]
    pub tray: TrayConfig,
    /// User-defined hub commands, in display order.
    #[serde(default)]
    pub commands: Vec<CommandRecord>,
}

impl Config {
    /// Load the persisted settings, writing defaults on first run.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Could not read {:?}: {}", config_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Malformed TOML: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Settings loaded");

            Ok(config)
        } else {
            info!("No settings file yet, writing defaults");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Persist the settings atomically.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Could not serialize settings: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Could not create {:?}: {}", temp_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Write to {:?} failed: {}", temp_path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Sync of {:?} failed: {}", temp_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Rename onto {:?} failed: {}", config_path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Settings saved");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "hubdeck", "Hubdeck").ok_or_else(|| {
            AppError::ConfigError {
                reason: "No home directory to resolve the config path from".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Config directory created");
        }

        Ok(config_dir.join("config.toml"))
    }
}
