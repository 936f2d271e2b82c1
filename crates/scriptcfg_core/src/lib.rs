//! Scriptcfg Core
//!
//! The data side of script-driven configuration:
//! - `ConfigContainer`: the name-keyed bag a script populates
//! - `ValueKind`: runtime type tag of a stored entry
//! - `LookupError`: typed retrieval failures

pub mod container;
pub mod error;

pub use container::{ConfigContainer, ValueKind};
pub use error::LookupError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
