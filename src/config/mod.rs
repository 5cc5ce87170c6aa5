//! Configuration management for the Bruno launcher.
//!
//! This module provides configuration loading, validation, and access through
//! a singleton pattern. Configuration is read from the host launcher's
//! settings under the "bruno-launcher" key and merged with defaults.

pub mod schema;

pub use schema::{expand_tilde, home_dir, LauncherConfig};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Global configuration instance.
///
/// Lazily initialized on first access and updated when settings change.
static CONFIG: Lazy<RwLock<LauncherConfig>> =
    Lazy::new(|| RwLock::new(LauncherConfig::default()));

/// Loads configuration from host settings or a JSON value.
///
/// Reads the "bruno-launcher" settings, merges them with defaults, validates
/// the result, and updates the global configuration.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under the
///   "bruno-launcher" key
///
/// # Returns
///
/// `Ok(LauncherConfig)` with the loaded configuration, or `Err` if validation fails.
///
/// # Example
///
/// ```
/// use bruno_launcher::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "bruno-launcher": {
///         "workspacePath": "~/api-collections",
///         "historyLimit": 50
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.history_limit, 50);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<LauncherConfig, String> {
    let mut config = LauncherConfig::default();

    if let Some(settings) = settings_json {
        if let Some(launcher_settings) = settings.get("bruno-launcher") {
            match serde_json::from_value::<LauncherConfig>(launcher_settings.clone()) {
                Ok(user_config) => {
                    // User settings take precedence over defaults.
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse bruno-launcher settings: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}. Using defaults.", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Singleton accessor returning a clone of the current configuration. If
/// configuration has not been loaded yet, returns the default configuration.
pub fn get_config() -> LauncherConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| LauncherConfig::default())
}

/// Updates a specific configuration setting.
///
/// Allows granular updates without replacing the entire config object. If the
/// updated configuration fails validation it is reverted to defaults.
///
/// # Arguments
///
/// * `updater` - A closure that modifies the configuration
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut LauncherConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            eprintln!(
                "Warning: Configuration validation failed after update: {}",
                e
            );
            *config = LauncherConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
///
/// Useful for testing or when the user wants to clear custom settings.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = LauncherConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.workspace_path, "~/.bruno");
        assert_eq!(config.binary_path, "bru");
        assert_eq!(config.history_limit, 100);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_with_user_settings() {
        let settings = json!({
            "bruno-launcher": {
                "workspacePath": "/srv/bruno",
                "binaryPath": "/opt/bru/bin/bru",
                "historyLimit": 20
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.workspace_path, "/srv/bruno");
        assert_eq!(config.binary_path, "/opt/bru/bin/bru");
        assert_eq!(config.history_limit, 20);
        // Unspecified settings keep defaults.
        assert_eq!(config.extra_path_dirs.len(), 2);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_invalid_value_falls_back() {
        let settings = json!({
            "bruno-launcher": {
                "historyLimit": "not-a-number"
            }
        });

        // Unparseable settings are discarded and defaults remain.
        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.history_limit, 100);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_validation_error() {
        let settings = json!({
            "bruno-launcher": {
                "historyLimit": 0
            }
        });

        let result = load_config(Some(settings));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("historyLimit"));
        reset_config();
    }

    #[test]
    #[serial]
    fn test_get_config_reflects_load() {
        reset_config();
        assert_eq!(get_config().history_limit, 100);

        let settings = json!({
            "bruno-launcher": {
                "historyLimit": 42
            }
        });
        load_config(Some(settings)).unwrap();
        assert_eq!(get_config().history_limit, 42);

        reset_config();
    }

    #[test]
    #[serial]
    fn test_update_config() {
        reset_config();

        update_config(|config| {
            config.workspace_path = "/tmp/bruno-workspace".to_string();
        });
        assert_eq!(get_config().workspace_path, "/tmp/bruno-workspace");

        reset_config();
    }

    #[test]
    #[serial]
    fn test_update_config_invalid_reverts() {
        reset_config();

        update_config(|config| {
            config.history_limit = 0;
        });

        // Reverted to defaults after failed validation.
        assert_eq!(get_config().history_limit, 100);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_no_launcher_key() {
        let settings = json!({
            "other-extension": {"someSetting": true}
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.workspace_path, "~/.bruno");
        reset_config();
    }
}
