//! Script location
//!
//! An explicit override wins; otherwise the script sits beside the host's
//! configuration file with the script extension.

use crate::error::SourceError;
use crate::settings::{HostSettings, CONFIGURATION_FILE_SETTING};
use std::path::PathBuf;
use std::sync::Arc;

/// Extension of the default script file
pub const SCRIPT_EXTENSION: &str = "js";

pub struct ScriptSourceResolver {
    override_path: Option<PathBuf>,
    settings: Arc<dyn HostSettings>,
}

impl ScriptSourceResolver {
    pub fn new(settings: Arc<dyn HostSettings>) -> Self {
        Self {
            override_path: None,
            settings,
        }
    }

    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn resolve(&self) -> Result<PathBuf, SourceError> {
        if let Some(path) = &self.override_path {
            tracing::debug!(path = %path.display(), "using explicit script path");
            return Ok(path.clone());
        }

        let config_file =
            self.settings
                .configuration_file()
                .ok_or(SourceError::Resolution {
                    setting: CONFIGURATION_FILE_SETTING,
                })?;

        let path = config_file.with_extension(SCRIPT_EXTENSION);
        tracing::debug!(path = %path.display(), "derived script path from host settings");
        Ok(path)
    }
}
