//! Scriptcfg Loader
//!
//! Entry point for script-driven configuration:
//!
//! ```ignore
//! use scriptcfg_loader::Config;
//!
//! let config = Config::new().use_script_loader().load().await?;
//! let port: u16 = config.get("Port")?;
//! ```
//!
//! A load resolves the script path, reads it, compiles it and runs it once.
//! Every stage fails with its own `LoadError` variant.

pub mod config;
pub mod error;
pub mod loader;

pub use config::Config;
pub use error::{LoadError, LoadErrorKind};
pub use loader::{Loader, ScriptLoader};

pub use scriptcfg_core::{ConfigContainer, LookupError, ValueKind};
pub use scriptcfg_services::{HostSettings, ProcessSettings, StaticSettings};
