//! File-backed key-value storage: one `<key>.json` file per key.

use super::storage::KeyValueStorage;
use crate::error::{BlitzError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates the data directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| BlitzError::StorageWrite {
            key: root.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("File storage opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlitzError::StorageRead {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| BlitzError::StorageWrite {
            key: key.to_string(),
            reason: e.to_string(),
        };

        // Readers only ever see the old or the new file.
        std::fs::write(&tmp, value).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;
        trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlitzError::StorageWrite {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
