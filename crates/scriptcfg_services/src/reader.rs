//! Script text reader

use crate::error::SourceError;
use std::path::{Path, PathBuf};

/// Script text read from disk
#[derive(Debug, Clone)]
pub struct ScriptSource {
    pub path: PathBuf,
    pub text: String,
}

impl ScriptSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

pub async fn read_script(path: &Path) -> Result<ScriptSource, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    tracing::debug!(path = %path.display(), bytes = text.len(), "read script");
    Ok(ScriptSource::new(path, text))
}
