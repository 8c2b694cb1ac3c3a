//! Persistence
//!
//! Key-value storage seam and the tolerant load/save routines for the
//! todo list, its id counter and the theme preference.

use std::collections::HashSet;

use crate::config::StorageKeys;
use crate::models::{Theme, TodoItem};

/// Storage-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage disabled or not present
    Unavailable(String),
    Read(String),
    /// Write rejected, e.g. quota exceeded
    Write(String),
    Malformed(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::Read(msg) => write!(f, "Read failed: {}", msg),
            StorageError::Write(msg) => write!(f, "Write failed: {}", msg),
            StorageError::Malformed(msg) => write!(f, "Malformed data: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> StorageResult<web_sys::Storage> {
        let window = crate::dom::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{}: {:?}", key, e)))
    }
}

/// Persisted list contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub items: Vec<TodoItem>,
    pub next_id: u32,
}

fn parse_items(raw: &str) -> StorageResult<Vec<TodoItem>> {
    let items: Vec<TodoItem> = serde_json::from_str(raw).map_err(|e| StorageError::Malformed(e.to_string()))?;
    // First occurrence of an id wins
    let mut seen = HashSet::new();
    Ok(items.into_iter().filter(|i| seen.insert(i.id)).collect())
}

fn parse_counter(raw: &str) -> StorageResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| StorageError::Malformed(format!("counter {:?}: {}", raw, e)))
}

/// Read the list and counter. Never fails: bad entries fall back to defaults.
pub fn load_snapshot(store: &impl KeyValueStore, keys: &StorageKeys) -> Snapshot {
    let items = match store.get(keys.todos).and_then(|raw| raw.as_deref().map(parse_items).transpose()) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            log::warn!("[STORAGE] Could not load todos: {}", e);
            // A corrupt list also invalidates its counter
            return Snapshot::default();
        }
    };
    let next_id = match store.get(keys.next_id).and_then(|raw| raw.as_deref().map(parse_counter).transpose()) {
        Ok(counter) => counter.unwrap_or(0),
        Err(e) => {
            log::warn!("[STORAGE] Could not load todo counter: {}", e);
            0
        }
    };
    log::info!("[STORAGE] Loaded {} todos, next id {}", items.len(), next_id);
    Snapshot { items, next_id }
}

/// Write the list and counter
pub fn save_snapshot(store: &impl KeyValueStore, keys: &StorageKeys, items: &[TodoItem], next_id: u32) -> StorageResult<()> {
    let json = serde_json::to_string(items).map_err(|e| StorageError::Write(e.to_string()))?;
    store.set(keys.todos, &json)?;
    store.set(keys.next_id, &next_id.to_string())
}

/// Explicit theme preference, if one was recorded
pub fn load_theme(store: &impl KeyValueStore, keys: &StorageKeys) -> Option<Theme> {
    match store.get(keys.theme) {
        Ok(Some(raw)) => {
            let theme = Theme::parse(&raw);
            if theme.is_none() {
                log::warn!("[STORAGE] Ignoring unknown theme preference {:?}", raw);
            }
            theme
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("[STORAGE] Could not load theme preference: {}", e);
            None
        }
    }
}

pub fn save_theme(store: &impl KeyValueStore, keys: &StorageKeys, theme: Theme) -> StorageResult<()> {
    store.set(keys.theme, theme.as_str())
}
