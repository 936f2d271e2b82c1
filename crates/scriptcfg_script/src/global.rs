//! Global contract
//!
//! The one object a script sees, and how its Rust counterpart is seeded
//! from and refilled after a run.

use scriptcfg_core::ConfigContainer;
use serde_json::Value;

pub trait ScriptGlobal {
    /// Name the script uses to reach the binding
    const NAME: &'static str;

    /// Entries visible to the script before it runs.
    fn seed(&self) -> Vec<(String, Value)>;

    /// Take the entries the script left behind.
    fn absorb(&mut self, entries: Vec<(String, Value)>);
}

impl ScriptGlobal for ConfigContainer {
    const NAME: &'static str = "Config";

    fn seed(&self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn absorb(&mut self, entries: Vec<(String, Value)>) {
        self.replace_all(entries);
    }
}
