//! Scriptcfg Scripting System
//!
//! JavaScript configuration scripts via QuickJS
//!
//! ## Architecture
//!
//! - **Compile:** the script becomes the body of a function taking the global
//!   binding as its only parameter. Nothing runs at this point.
//! - **Run:** the function is called once with a fresh object seeded from the
//!   Rust-side global, then the object's properties are harvested back.
//! - **FFI:** values cross the boundary as JSON (`serde_json::Value`).

pub mod error;
pub mod ffi;
pub mod global;
pub mod runtime;

pub use error::{CompileError, Diagnostic, ExecutionError, ScriptError};
pub use global::ScriptGlobal;
pub use runtime::{CompiledUnit, ScriptEngine};

pub use rquickjs;
