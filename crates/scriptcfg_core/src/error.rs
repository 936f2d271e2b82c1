use crate::container::ValueKind;
use thiserror::Error;

/// Errors returned when reading an entry back out of a container.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("configuration entry '{name}' was never set")]
    NotFound { name: String },

    #[error("configuration entry '{name}' holds {actual}, which is not assignable to {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: ValueKind,
        #[source]
        source: serde_json::Error,
    },
}

impl LookupError {
    /// Name of the entry the lookup was for.
    pub fn name(&self) -> &str {
        match self {
            LookupError::NotFound { name } | LookupError::TypeMismatch { name, .. } => name,
        }
    }
}
