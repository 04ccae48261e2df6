//! Product records and the persisted collection layout.

use super::dates::days_until;
use crate::error::{BlitzError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SCHEMA_VERSION: u32 = 1;

/// One registered product. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "codigo")]
    pub code: String,
    #[serde(alias = "lote")]
    pub lot: String,
    #[serde(alias = "vencimento")]
    pub expiration_date: NaiveDate,
    /// Snapshot taken at registration time.
    #[serde(alias = "diasRestantes")]
    pub days_remaining: i64,
    #[serde(alias = "dataRegistro")]
    pub registered_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Days left as seen from `now`, ignoring the stored snapshot.
    pub fn days_remaining_at(&self, now: NaiveDateTime) -> i64 {
        days_until(self.expiration_date, now)
    }
}

/// Versioned envelope written under the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCollection {
    pub version: u32,
    pub records: Vec<ProductRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Versioned(RecordCollection),
    // Unversioned layout: a bare array of records, read one by one.
    Legacy(Vec<serde_json::Value>),
}

impl RecordCollection {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            records,
        }
    }

    pub fn from_json(blob: &str) -> Result<Self> {
        match serde_json::from_str::<StoredBlob>(blob) {
            Ok(StoredBlob::Versioned(collection)) if collection.version == SCHEMA_VERSION => {
                Ok(collection)
            }
            Ok(StoredBlob::Versioned(collection)) => Err(BlitzError::Encode(format!(
                "unsupported schema version {}",
                collection.version
            ))),
            Ok(StoredBlob::Legacy(values)) => Ok(Self::new(migrate_legacy(values))),
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Keeps every legacy entry that still parses. Entries saved with an empty
/// or invalid date are dropped on their own.
fn migrate_legacy(values: Vec<serde_json::Value>) -> Vec<ProductRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping legacy record #{}: {}", index, e);
                None
            }
        })
        .collect()
}
