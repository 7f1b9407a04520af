//! Situational context: the agent's view of its environment this tick.
//!
//! A string-keyed map of structured values (recent events, trending topics,
//! timeline state). The consciousness loop reads it at the top of every tick;
//! writers are external collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SituationalContext {
    entries: BTreeMap<String, serde_json::Value>,
}

impl SituationalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: serde_json::Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defensive copy of the full context.
    pub fn snapshot(&self) -> BTreeMap<String, serde_json::Value> {
        self.entries.clone()
    }
}
