use std::collections::HashMap;

/// In-process read cache keyed by collection name.
///
/// Policy: every successful mutation overwrites the cached value with the
/// post-mutation collection directly, so a read immediately after a write
/// never depends on re-fetch timing. `invalidate_all` exists only for
/// workspace switches, where every cached collection is stale by
/// construction.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<String, serde_json::Value>,
}

impl QueryCache {
    pub fn new() -> QueryCache {
        QueryCache::default()
    }

    pub fn read(&self, name: &str) -> Option<&serde_json::Value> {
        self.entries.get(name)
    }

    pub fn write(&mut self, name: &str, value: serde_json::Value) {
        self.entries.insert(name.to_string(), value);
    }

    pub fn invalidate(&mut self, name: &str) {
        self.entries.remove(name);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }
}
