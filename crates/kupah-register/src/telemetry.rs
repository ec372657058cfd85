//! # Logging Setup
//!
//! `RUST_LOG` wins when set; otherwise the configured filter is used, and a
//! filter that fails to parse falls back to `info`.

use tracing_subscriber::EnvFilter;

use crate::config::RegisterConfig;

/// Installs the global fmt subscriber.
///
/// Returns false if a subscriber was already installed (tests, embedding
/// hosts), in which case the existing one is left in place.
pub fn init_tracing(config: &RegisterConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
