//! Key-value storage seam for persisted state.

use crate::error::Result;
use std::collections::HashMap;

/// String blobs addressed by key. Each call is a single read or write.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage whose reads always fail. Writes are accepted and dropped.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct UnreadableStorage;

#[cfg(test)]
impl KeyValueStorage for UnreadableStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(crate::error::BlitzError::StorageRead {
            key: key.to_string(),
            reason: "permission denied".into(),
        })
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Ok(())
    }
}
