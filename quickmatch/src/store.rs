use std::collections::HashMap;

/// Keyed ephemeral persistence for encoded sessions. Implementations are
/// scoped to a single browser session equivalent; no cross-tab or
/// cross-device sync is implied.
pub trait SessionStore {
    fn put(&mut self, key: &str, value: String);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&mut self, key: &str);
}

/// Store entries are namespaced by match id.
pub fn storage_key(match_id: &str) -> String {
    format!("match_{match_id}")
}

/// In-memory store, also the test double for browser-backed stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
