//! Load a configuration script and print what it produced
//!
//! Usage: `cargo run -p scriptcfg_loader --example load_config -- path/to/app.js`

use anyhow::Result;
use scriptcfg_loader::{Config, ProcessSettings};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::new().use_script_loader_at(path),
        None => Config::new()
            .with_settings(Arc::new(ProcessSettings))
            .use_script_loader(),
    };

    let config = config.load().await?;
    for (name, value) in config.iter() {
        println!("{name} ({}) = {value}", scriptcfg_loader::ValueKind::of(value));
    }

    Ok(())
}
