//! Loader strategies

use crate::error::LoadError;
use async_trait::async_trait;
use scriptcfg_core::ConfigContainer;
use scriptcfg_script::ScriptEngine;
use scriptcfg_services::{read_script, HostSettings, ScriptSource, ScriptSourceResolver};
use std::path::PathBuf;
use std::sync::Arc;

/// One way of producing configuration entries.
///
/// `config` holds whatever earlier loaders produced; the returned container
/// replaces it.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, config: ConfigContainer) -> Result<ConfigContainer, LoadError>;
}

/// Runs a JavaScript file that assigns onto `Config`
pub struct ScriptLoader {
    resolver: ScriptSourceResolver,
}

impl ScriptLoader {
    pub fn new(settings: Arc<dyn HostSettings>) -> Self {
        Self {
            resolver: ScriptSourceResolver::new(settings),
        }
    }

    pub fn with_path(settings: Arc<dyn HostSettings>, path: impl Into<PathBuf>) -> Self {
        Self {
            resolver: ScriptSourceResolver::new(settings).with_override(path),
        }
    }

    /// Load into a fresh container.
    pub async fn load_async(&self) -> Result<ConfigContainer, LoadError> {
        self.load(ConfigContainer::new()).await
    }
}

#[async_trait]
impl Loader for ScriptLoader {
    async fn load(&self, config: ConfigContainer) -> Result<ConfigContainer, LoadError> {
        let path = self.resolver.resolve()?;
        let source = read_script(&path).await?;

        // QuickJS is synchronous; the runtime lives and dies on the worker.
        let result = tokio::task::spawn_blocking(move || execute(source, config))
            .await
            .map_err(|err| LoadError::Engine(err.to_string()))?;

        match &result {
            Ok(config) => tracing::info!(
                path = %path.display(),
                entries = config.len(),
                "loaded configuration script"
            ),
            Err(err) => tracing::warn!(
                path = %path.display(),
                kind = ?err.kind(),
                "configuration script failed"
            ),
        }

        result
    }
}

fn execute(
    source: ScriptSource,
    mut config: ConfigContainer,
) -> Result<ConfigContainer, LoadError> {
    let engine = ScriptEngine::new()?;
    let unit = engine.compile::<ConfigContainer>(&source)?;
    engine.run(unit, &mut config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptcfg_services::StaticSettings;
    use serde_json::json;
    use std::io::Write;

    fn script(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_from_explicit_path() {
        let file = script("Config.Name = 'svc'; Config.Workers = 4;");
        let loader = ScriptLoader::with_path(Arc::new(StaticSettings::unset()), file.path());

        let config = loader.load_async().await.unwrap();
        assert_eq!(config.get::<String>("Name").unwrap(), "svc");
        assert_eq!(config.get::<u32>("Workers").unwrap(), 4);
    }

    #[tokio::test]
    async fn test_load_sees_prior_entries() {
        let file = script("Config.Workers = Config.Workers * 2;");
        let loader = ScriptLoader::with_path(Arc::new(StaticSettings::unset()), file.path());

        let mut seed = ConfigContainer::new();
        seed.insert("Workers", json!(3));

        let config = loader.load(seed).await.unwrap();
        assert_eq!(config.get::<u32>("Workers").unwrap(), 6);
    }

    #[tokio::test]
    async fn test_unreadable_script_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader =
            ScriptLoader::with_path(Arc::new(StaticSettings::unset()), dir.path().join("none.js"));

        let err = loader.load_async().await.unwrap_err();
        assert_eq!(err.kind(), crate::LoadErrorKind::Io);
    }
}
