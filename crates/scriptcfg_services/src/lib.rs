//! Scriptcfg Services Layer
//!
//! Host-facing plumbing in front of the script engine: where the host keeps
//! its settings, where the script lives, and reading it off disk.

pub mod error;
pub mod reader;
pub mod resolver;
pub mod settings;

pub use error::SourceError;
pub use reader::{read_script, ScriptSource};
pub use resolver::{ScriptSourceResolver, SCRIPT_EXTENSION};
pub use settings::{HostSettings, ProcessSettings, StaticSettings};
