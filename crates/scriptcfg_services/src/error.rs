use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading a script.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{setting} is null")]
    Resolution { setting: &'static str },

    #[error("failed to read script '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
