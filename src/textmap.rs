use indexmap::IndexMap;
use serde_json::Value;

/// Field holding the hash in a TextMap entry.
pub const HASH_FIELD: &str = "textMapHash";
/// Field holding the localized string in a TextMap entry.
pub const TEXT_FIELD: &str = "text";

/// Canonical string form of a hash reference.
///
/// TextMap stores hashes as numbers while the game tables sometimes carry them
/// as strings (or the other way round), so both the index and every lookup go
/// through this one function. Numbers render in decimal, strings are taken
/// as-is, everything else has no key.
pub fn hash_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Hash -> localized text, built once from a TextMap document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashIndex {
    entries: IndexMap<String, String>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a parsed TextMap document.
    ///
    /// Anything other than an array yields an empty index. Entries that are not
    /// objects, lack either field, carry a hash that is not a number or string,
    /// or carry non-string text are skipped without a report. Duplicate hashes
    /// keep the last text seen.
    pub fn from_entries(doc: &Value) -> Self {
        let mut index = Self::new();
        if let Some(items) = doc.as_array() {
            for item in items {
                let Some(entry) = item.as_object() else { continue };
                let key = entry.get(HASH_FIELD).and_then(hash_key);
                let text = entry.get(TEXT_FIELD).and_then(Value::as_str);
                if let (Some(key), Some(text)) = (key, text) {
                    index.insert(key, text.to_string());
                }
            }
        }
        index
    }

    pub fn insert(&mut self, key: String, text: String) {
        // shift_remove keeps iteration order equal to last-write order
        self.entries.shift_remove(&key);
        self.entries.insert(key, text);
    }

    /// Look up text by an already-coerced key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up text by a raw hash value from a game table.
    pub fn resolve(&self, hash: &Value) -> Option<&str> {
        hash_key(hash).and_then(|key| self.get(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
