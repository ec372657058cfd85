//! # Register Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Register Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────┐        │
//! │  │     Configuration       │        │        Ledger           │        │
//! │  │                         │        │                         │        │
//! │  │  InvalidConfig          │        │  Core(CoreError)        │        │
//! │  │  ConfigLoadFailed       │        │                         │        │
//! │  │  ConfigSaveFailed       │        │                         │        │
//! │  └─────────────────────────┘        └─────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kupah_core::CoreError;
use thiserror::Error;

/// Result type alias for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Errors raised by the register layer.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Configuration values failed validation.
    #[error("Invalid register configuration: {0}")]
    InvalidConfig(String),

    /// Reading or parsing the config file failed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Writing the config file failed.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// A ledger operation was rejected.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for RegisterError {
    fn from(err: std::io::Error) -> Self {
        RegisterError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for RegisterError {
    fn from(err: toml::de::Error) -> Self {
        RegisterError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for RegisterError {
    fn from(err: toml::ser::Error) -> Self {
        RegisterError::ConfigSaveFailed(err.to_string())
    }
}

impl RegisterError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RegisterError::InvalidConfig(_)
                | RegisterError::ConfigLoadFailed(_)
                | RegisterError::ConfigSaveFailed(_)
        )
    }
}
