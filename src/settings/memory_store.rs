use super::SettingsStore;
use std::collections::BTreeMap;

/// In-process settings store. Remembers every write so callers can audit them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    writes: Vec<(String, i64)>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Builds a store pre-populated with `entries`. These do not count as writes.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self {
            values: entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            writes: Vec::new(),
        }
    }

    pub fn value(&self, key: &str) -> Option<i64> { self.values.get(key).copied() }

    /// All writes in the order they happened.
    pub fn writes(&self) -> &[(String, i64)] { &self.writes }

    pub fn writes_to(&self, key: &str) -> Vec<i64> {
        self.writes.iter().filter(|(k, _)| k == key).map(|(_, v)| *v).collect()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str, default: i64) -> i64 { self.values.get(key).copied().unwrap_or(default) }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes.push((key.to_string(), value));
    }
}
