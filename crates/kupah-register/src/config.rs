//! # Register Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KUPAH_REGISTER_ID, KUPAH_REGISTER_NAME,                            │
//! │     KUPAH_STORE_NAME, KUPAH_LOG                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kupah/register.toml (Linux)                              │
//! │     ~/Library/Application Support/com.kupah.kupah/register.toml        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     auto-generated register id, "info" log filter                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [register]
//! id = "register-01"
//! name = "Register 1"
//!
//! [store]
//! name = "Downtown Branch"
//!
//! [logging]
//! filter = "info,kupah_core=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{RegisterError, RegisterResult};

const CONFIG_FILE_NAME: &str = "register.toml";

// =============================================================================
// Sections
// =============================================================================

/// Identity of this register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSettings {
    /// Register identifier, stamped on every transaction log line.
    /// Auto-generated (UUID v4) if not provided.
    #[serde(default = "default_register_id")]
    pub id: String,

    /// Human-readable register name.
    #[serde(default = "default_register_name")]
    pub name: String,
}

fn default_register_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_register_name() -> String {
    "Register".to_string()
}

impl Default for RegisterSettings {
    fn default() -> Self {
        RegisterSettings {
            id: default_register_id(),
            name: default_register_name(),
        }
    }
}

/// The store this register belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Kupah Dev Store".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Register Configuration
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub register: RegisterSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`register.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RegisterResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading register config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load register config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> RegisterResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RegisterError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Register config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RegisterResult<()> {
        if self.register.id.trim().is_empty() {
            return Err(RegisterError::InvalidConfig(
                "register id must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(RegisterError::InvalidConfig(
                "logging filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `KUPAH_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("KUPAH_REGISTER_ID") {
            debug!(register_id = %id, "Overriding register ID from environment");
            self.register.id = id;
        }

        if let Some(name) = lookup("KUPAH_REGISTER_NAME") {
            self.register.name = name;
        }

        if let Some(name) = lookup("KUPAH_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(filter) = lookup("KUPAH_LOG") {
            debug!(filter = %filter, "Overriding log filter from environment");
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "kupah", "kupah")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Returns the register ID.
    pub fn register_id(&self) -> &str {
        &self.register.id
    }
}
