pub mod file_system;
pub mod record_store;
pub mod storage;

pub use file_system::FileStorage;
pub use record_store::{RecordStore, STORAGE_KEY};
pub use storage::{KeyValueStorage, MemoryStorage};
