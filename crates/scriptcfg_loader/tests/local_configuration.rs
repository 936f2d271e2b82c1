//! Loading a local configuration script end to end.

use scriptcfg_loader::{
    Config, ConfigContainer, LoadError, LoadErrorKind, LookupError, ScriptLoader, StaticSettings,
    ValueKind,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct Foo {
    #[serde(rename = "Bar")]
    bar: String,
}

/// Host layout: `app.config` as the host configuration file and `app.js`
/// beside it.
struct Host {
    dir: tempfile::TempDir,
}

impl Host {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn with_script(code: &str) -> Self {
        let host = Self::new();
        host.write("app.js", code);
        host
    }

    fn write(&self, name: &str, code: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, code).unwrap();
        path
    }

    fn settings(&self) -> Arc<StaticSettings> {
        Arc::new(StaticSettings::new(self.dir.path().join("app.config")))
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    async fn load(&self) -> Result<ConfigContainer, LoadError> {
        Config::new()
            .with_settings(self.settings())
            .use_script_loader()
            .load()
            .await
    }
}

#[tokio::test]
async fn retrieving_an_object() {
    let host = Host::with_script(r#"Config.Foo = { Bar: "baz" };"#);

    let config = host.load().await.unwrap();

    let foo: Foo = config.get("Foo").unwrap();
    assert_eq!(foo.bar, "baz");
}

#[tokio::test]
async fn script_fails_to_compile() {
    let host = Host::with_script("This is not C#!");

    let err = host.load().await.unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::Compilation);
    let LoadError::Compile(err) = err else {
        unreachable!()
    };
    assert!(!err.diagnostics.is_empty());
    assert!(err.path.ends_with("app.js"));
}

#[tokio::test]
async fn script_fails_to_execute() {
    let host = Host::with_script(r#"throw new Error("Boo!");"#);

    let err = host.load().await.unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::Execution);
    assert_eq!(err.to_string(), "Boo!");
}

#[tokio::test]
async fn configuration_file_is_null() {
    let err = Config::new()
        .with_settings(Arc::new(StaticSettings::unset()))
        .use_script_loader()
        .load()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::SourceResolution);
    assert_eq!(
        err.to_string(),
        "the application's configuration-file setting is null"
    );
}

#[tokio::test]
async fn missing_script_is_io_error() {
    let host = Host::new();

    let err = host.load().await.unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::Io);
}

#[tokio::test]
async fn typed_lookup_failures() {
    let host = Host::with_script("Config.Port = 'eighty';");

    let config = host.load().await.unwrap();

    assert!(matches!(
        config.get::<u16>("Port"),
        Err(LookupError::TypeMismatch {
            actual: ValueKind::String,
            ..
        })
    ));
    assert!(matches!(
        config.get::<u16>("port"),
        Err(LookupError::NotFound { .. })
    ));
}

#[tokio::test]
async fn independent_loaders_do_not_share_state() {
    let host = Host::with_script(concat!(
        "Config.Count = (Config.Count || 0) + 1;\n",
        "globalThis.leak = (globalThis.leak || 0) + 1;\n",
        "Config.Leak = globalThis.leak;\n",
    ));
    let script = host.path().join("app.js");

    let first = ScriptLoader::with_path(host.settings(), &script);
    let second = ScriptLoader::with_path(host.settings(), &script);

    let mut a = first.load_async().await.unwrap();
    let b = second.load_async().await.unwrap();

    assert_eq!(a, b);
    assert_eq!(a.get::<i64>("Count").unwrap(), 1);
    assert_eq!(b.get::<i64>("Leak").unwrap(), 1);

    a.insert("Count", serde_json::json!(100));
    assert_eq!(b.get::<i64>("Count").unwrap(), 1);
}

#[tokio::test]
async fn chained_scripts_build_on_each_other() {
    let host = Host::with_script("Config.Host = 'db.internal'; Config.Port = 5432;");
    let overrides = host.write(
        "overrides.js",
        "Config.Port = 6543; Config.Url = Config.Host + ':' + Config.Port;",
    );

    let config = Config::new()
        .with_settings(host.settings())
        .use_script_loader()
        .use_script_loader_at(overrides)
        .load()
        .await
        .unwrap();

    assert_eq!(config.get::<u16>("Port").unwrap(), 6543);
    assert_eq!(config.get::<String>("Url").unwrap(), "db.internal:6543");
}

#[tokio::test]
async fn functions_cannot_be_stored() {
    let host = Host::with_script("Config.OnStart = () => 1;");

    let err = host.load().await.unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::Unsupported);
    assert!(matches!(err, LoadError::Unsupported { ref name, .. } if name == "OnStart"));
}

#[tokio::test]
async fn non_finite_numbers_cannot_be_stored() {
    let host = Host::with_script("Config.Limit = 1 / 0;");

    let err = host.load().await.unwrap_err();

    assert!(matches!(err, LoadError::Unsupported { ref name, .. } if name == "Limit"));
}

#[tokio::test]
async fn compile_failure_runs_nothing_outside_the_script() {
    let host = Host::with_script("}); throw new Error('escaped'); (function(){");

    let err = host.load().await.unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::Compilation);
}

#[tokio::test]
async fn byte_order_mark_is_ignored() {
    let host = Host::with_script("\u{feff}Config.Ok = true;");

    let config = host.load().await.unwrap();

    assert!(config.get::<bool>("Ok").unwrap());
}
