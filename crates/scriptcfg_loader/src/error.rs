use scriptcfg_script::{CompileError, ExecutionError, ScriptError};
use scriptcfg_services::SourceError;
use thiserror::Error;

/// Everything a load can fail with.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("configuration entry '{name}' cannot be stored: {reason}")]
    Unsupported { name: String, reason: String },

    #[error("script engine failure: {0}")]
    Engine(String),
}

/// Failure kinds callers branch on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    SourceResolution,
    Io,
    Compilation,
    Execution,
    Unsupported,
    Engine,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Source(SourceError::Resolution { .. }) => LoadErrorKind::SourceResolution,
            LoadError::Source(SourceError::Io { .. }) => LoadErrorKind::Io,
            LoadError::Compile(_) => LoadErrorKind::Compilation,
            LoadError::Execution(_) => LoadErrorKind::Execution,
            LoadError::Unsupported { .. } => LoadErrorKind::Unsupported,
            LoadError::Engine(_) => LoadErrorKind::Engine,
        }
    }
}

impl From<ScriptError> for LoadError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::Compile(err) => LoadError::Compile(err),
            ScriptError::Execution(err) => LoadError::Execution(err),
            ScriptError::Unsupported { name, reason } => LoadError::Unsupported { name, reason },
            ScriptError::Engine(message) => LoadError::Engine(message),
        }
    }
}
