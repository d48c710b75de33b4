//! Custom prompt store
//!
//! Saved prompts live as one JSON array under a fixed key in whatever
//! key-value storage the host offers. A malformed blob is logged and
//! treated as empty; it gets overwritten on the next save.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Storage key the prompt array is kept under
pub const STORE_KEY: &str = "aura-custom-prompts";

/// Prompt store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize prompts: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist prompts: {0}")]
    Persist(String),
}

/// Host key-value storage the prompt blob is persisted in
pub trait KeyValue {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Plain in-memory storage, for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One saved prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub id: String,
    pub title: String,
    pub prompt: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub created: String,
}

fn default_icon() -> String {
    "💡".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

/// Fields of a prompt being added
#[derive(Debug, Clone, Default)]
pub struct NewPrompt {
    pub title: String,
    pub prompt: String,
    pub icon: Option<String>,
    pub category: Option<String>,
}

/// An ordered collection of saved prompts
#[derive(Debug, Default)]
pub struct PromptStore {
    entries: Vec<PromptEntry>,
}

impl PromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the prompt array from storage
    ///
    /// A missing key yields an empty store; a malformed blob is logged and
    /// also yields an empty store.
    pub fn load_from(storage: &dyn KeyValue) -> Self {
        let Some(blob) = storage.get(STORE_KEY) else {
            return Self::new();
        };
        match serde_json::from_str::<Vec<PromptEntry>>(&blob) {
            Ok(entries) => {
                log::debug!("Loaded {} saved prompts", entries.len());
                Self { entries }
            }
            Err(e) => {
                log::warn!("Discarding malformed prompt store: {}", e);
                Self::new()
            }
        }
    }

    /// Persist the full array back under the fixed key
    pub fn save_to(&self, storage: &mut dyn KeyValue) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.entries)?;
        storage.set(STORE_KEY, &blob)
    }

    /// Add a prompt, returning its id
    ///
    /// Blank title or prompt text (after trimming) is rejected with None
    /// and the store is left untouched.
    pub fn add(&mut self, new: NewPrompt) -> Option<String> {
        if new.title.trim().is_empty() || new.prompt.trim().is_empty() {
            return None;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let mut id = now.to_string();
        // Same-millisecond adds must still get distinct ids
        while self.entries.iter().any(|e| e.id == id) {
            id.push('0');
        }

        self.entries.push(PromptEntry {
            id: id.clone(),
            title: new.title,
            prompt: new.prompt,
            icon: new.icon.unwrap_or_else(default_icon),
            category: new.category.unwrap_or_else(default_category),
            created: now.to_string(),
        });
        Some(id)
    }

    /// Remove a prompt by id; removing a missing id changes nothing
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Replace the title and text of an existing prompt
    pub fn update(&mut self, id: &str, title: &str, prompt: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.title = title.to_string();
        entry.prompt = prompt.to_string();
        true
    }

    /// Entry by id
    pub fn get(&self, id: &str) -> Option<&PromptEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries, in insertion order
    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(title: &str, prompt: &str) -> NewPrompt {
        NewPrompt {
            title: title.to_string(),
            prompt: prompt.to_string(),
            ..NewPrompt::default()
        }
    }

    #[test]
    fn test_add_and_roundtrip() {
        let mut storage = MemoryStorage::new();
        let mut store = PromptStore::new();

        let id = store.add(new("Summary", "Summarize this thread")).unwrap();
        store.save_to(&mut storage).unwrap();

        let loaded = PromptStore::load_from(&storage);
        assert_eq!(loaded.len(), 1);
        let entry = loaded.get(&id).unwrap();
        assert_eq!(entry.title, "Summary");
        assert_eq!(entry.icon, "💡");
        assert_eq!(entry.category, "General");
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut store = PromptStore::new();
        assert!(store.add(new("", "body")).is_none());
        assert!(store.add(new("title", "")).is_none());
        assert!(store.add(new("   ", "body")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_same_millisecond_ids_are_distinct() {
        let mut store = PromptStore::new();
        let a = store.add(new("a", "a")).unwrap();
        let b = store.add(new("b", "b")).unwrap();
        let c = store.add(new("c", "c")).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = PromptStore::new();
        store.add(new("a", "a")).unwrap();
        assert!(!store.remove("no-such-id"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = PromptStore::new();
        store.add(new("first", "1")).unwrap();
        let middle = store.add(new("second", "2")).unwrap();
        store.add(new("third", "3")).unwrap();

        assert!(store.remove(&middle));
        let titles: Vec<&str> = store.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[test]
    fn test_update() {
        let mut store = PromptStore::new();
        let id = store.add(new("old", "old text")).unwrap();

        assert!(store.update(&id, "new", "new text"));
        assert!(!store.update("missing", "x", "y"));

        let entry = store.get(&id).unwrap();
        assert_eq!(entry.title, "new");
        assert_eq!(entry.prompt, "new text");
    }

    #[test]
    fn test_malformed_blob_yields_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(STORE_KEY, "{not json").unwrap();
        assert!(PromptStore::load_from(&storage).is_empty());
    }

    #[test]
    fn test_missing_key_yields_empty() {
        let storage = MemoryStorage::new();
        assert!(PromptStore::load_from(&storage).is_empty());
    }

    #[test]
    fn test_partial_entry_gets_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                STORE_KEY,
                r#"[{"id":"1","title":"t","prompt":"p"}]"#,
            )
            .unwrap();
        let store = PromptStore::load_from(&storage);
        let entry = store.get("1").unwrap();
        assert_eq!(entry.icon, "💡");
        assert_eq!(entry.category, "General");
        assert_eq!(entry.created, "");
    }
}
