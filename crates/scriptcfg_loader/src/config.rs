//! Loader selection
//!
//! `Config` collects loader strategies and runs them in order, each one
//! building on the container the previous one produced.

use crate::error::LoadError;
use crate::loader::{Loader, ScriptLoader};
use scriptcfg_core::ConfigContainer;
use scriptcfg_services::{HostSettings, ProcessSettings};
use std::path::PathBuf;
use std::sync::Arc;

enum Strategy {
    /// Script at the given path, or at the path derived from host settings
    Script(Option<PathBuf>),
    Custom(Box<dyn Loader>),
}

pub struct Config {
    settings: Arc<dyn HostSettings>,
    strategies: Vec<Strategy>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            settings: Arc::new(ProcessSettings),
            strategies: Vec::new(),
        }
    }

    /// Host settings used to find the default script.
    pub fn with_settings(mut self, settings: Arc<dyn HostSettings>) -> Self {
        self.settings = settings;
        self
    }

    /// Run the script beside the host's configuration file.
    pub fn use_script_loader(mut self) -> Self {
        self.strategies.push(Strategy::Script(None));
        self
    }

    /// Run the script at `path`.
    pub fn use_script_loader_at(mut self, path: impl Into<PathBuf>) -> Self {
        self.strategies.push(Strategy::Script(Some(path.into())));
        self
    }

    pub fn use_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.strategies.push(Strategy::Custom(Box::new(loader)));
        self
    }

    /// Run every selected loader in order and return the final container.
    ///
    /// With nothing selected the default script loader runs.
    pub async fn load(&self) -> Result<ConfigContainer, LoadError> {
        let mut config = ConfigContainer::new();

        if self.strategies.is_empty() {
            return ScriptLoader::new(self.settings.clone()).load(config).await;
        }

        for strategy in &self.strategies {
            config = match strategy {
                Strategy::Script(None) => {
                    ScriptLoader::new(self.settings.clone())
                        .load(config)
                        .await?
                }
                Strategy::Script(Some(path)) => {
                    ScriptLoader::with_path(self.settings.clone(), path)
                        .load(config)
                        .await?
                }
                Strategy::Custom(loader) => loader.load(config).await?,
            };
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
