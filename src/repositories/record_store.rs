//! Product record persistence under a single storage key.

use super::storage::KeyValueStorage;
use crate::domain::{ProductRecord, RecordCollection};
use crate::error::Result;
use tracing::{debug, info, instrument, warn};

pub const STORAGE_KEY: &str = "blitzProdutos";

pub struct RecordStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every stored record in insertion order. Missing, unreadable or corrupt
    /// data yields an empty list.
    pub fn load(&self) -> Vec<ProductRecord> {
        let blob = match self.storage.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read stored records: {}", e);
                return Vec::new();
            }
        };

        match RecordCollection::from_json(&blob) {
            Ok(collection) => {
                debug!("Loaded {} records", collection.records.len());
                collection.records
            }
            Err(e) => {
                warn!("Discarding unreadable stored records: {}", e);
                Vec::new()
            }
        }
    }

    #[instrument(skip_all, fields(count = records.len()))]
    pub fn save(&mut self, records: &[ProductRecord]) -> Result<()> {
        let blob = RecordCollection::new(records.to_vec()).to_json()?;
        self.storage.set(STORAGE_KEY, &blob)
    }

    /// Loads, appends and saves. Returns the new record count.
    pub fn append(&mut self, record: ProductRecord) -> Result<usize> {
        let mut records = self.load();
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }

    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(STORAGE_KEY)?;
        info!("Stored records cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::storage::UnreadableStorage;
    use crate::repositories::MemoryStorage;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(name: &str, days: i64) -> ProductRecord {
        ProductRecord {
            name: name.into(),
            code: "7890000000000".into(),
            lot: "L1".into(),
            expiration_date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
                + chrono::Duration::days(days),
            days_remaining: days,
            registered_at: Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_load_empty_when_absent() {
        let store = RecordStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let records = vec![record("Arroz", 30), record("Feijão; carioca", 3)];

        store.save(&records).unwrap();
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        let store = RecordStore::new(MemoryStorage::with_entry(STORAGE_KEY, "{not json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        let store = RecordStore::new(UnreadableStorage);
        assert!(store.storage().get(STORAGE_KEY).is_err());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_keeps_insertion_order_and_duplicates() {
        let mut store = RecordStore::new(MemoryStorage::new());
        assert_eq!(store.append(record("Café", 50)).unwrap(), 1);
        assert_eq!(store.append(record("Café", 50)).unwrap(), 2);
        assert_eq!(store.append(record("Açúcar", 2)).unwrap(), 3);

        let names: Vec<_> = store.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Café", "Café", "Açúcar"]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.save(&[record("Sal", 100)]).unwrap();

        store.clear().unwrap();
        assert!(store.storage().is_empty());
        store.clear().unwrap();
        assert!(store.storage().is_empty());
        assert!(store.load().is_empty());
    }
}
