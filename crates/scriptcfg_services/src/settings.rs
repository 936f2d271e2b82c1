//! Host settings
//!
//! The hosting application's own configuration subsystem, reduced to the one
//! setting the loader needs: the path of the host's configuration file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the setting reported when it is missing
pub const CONFIGURATION_FILE_SETTING: &str = "the application's configuration-file setting";

/// Access to the host application's settings
pub trait HostSettings: Send + Sync {
    /// Path of the host's configuration file, if the host declares one.
    fn configuration_file(&self) -> Option<PathBuf>;
}

/// Settings derived from the running process: `<exe>.config` next to the
/// current executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSettings;

impl HostSettings for ProcessSettings {
    fn configuration_file(&self) -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .map(|exe| exe.with_extension("config"))
    }
}

/// Settings supplied directly by an embedding host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSettings {
    #[serde(default)]
    pub configuration_file: Option<PathBuf>,
}

impl StaticSettings {
    pub fn new(configuration_file: impl Into<PathBuf>) -> Self {
        Self {
            configuration_file: Some(configuration_file.into()),
        }
    }

    /// Settings with no configuration file declared.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl HostSettings for StaticSettings {
    fn configuration_file(&self) -> Option<PathBuf> {
        self.configuration_file.clone()
    }
}
