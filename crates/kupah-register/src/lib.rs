//! # kupah-register: Register Session Layer
//!
//! Everything a checkout host needs around the pure ledger in `kupah-core`.
//!
//! ## Module Organization
//! ```text
//! kupah_register/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── RegisterConfig (defaults → register.toml → env)
//! ├── telemetry.rs    ◄─── tracing-subscriber setup
//! ├── state.rs        ◄─── TransactionState, LedgerTotals
//! └── error.rs        ◄─── RegisterError
//! ```
//!
//! ## Startup
//! ```rust,no_run
//! use kupah_core::Item;
//! use kupah_register::{init_tracing, RegisterConfig, TransactionState};
//!
//! let config = RegisterConfig::load_or_default(None);
//! init_tracing(&config);
//!
//! let state = TransactionState::new(&config);
//! state.add(Item::unit("7290000688381", "Water 1.5L x6", 1090, 2)?);
//! println!("subtotal: {}", state.totals().subtotal_minor);
//! # Ok::<(), kupah_register::RegisterError>(())
//! ```

pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::RegisterConfig;
pub use error::{RegisterError, RegisterResult};
pub use state::{LedgerTotals, TransactionState};
pub use telemetry::init_tracing;
