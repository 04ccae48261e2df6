pub mod config;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// Public, stable-ish API surface for consumers (UI / other crates)

pub use crate::config::{Config, UrgencyMode};

pub use crate::domain::{
    days_until, Clock, Confirmation, Notice, NoticeKind, ProductRecord, Severity, SystemClock,
};

pub use crate::error::{BlitzError, Result};

pub use crate::repositories::{FileStorage, KeyValueStorage, MemoryStorage, RecordStore};

pub mod prelude {
    pub use crate::config::{Config, UrgencyMode};
    pub use crate::domain::{Clock, Confirmation, Notice, NoticeKind, ProductRecord, Severity};
    pub use crate::error::{BlitzError, Result};
    pub use crate::repositories::{FileStorage, KeyValueStorage, RecordStore};
    pub use crate::services::registration::{self, RegistrationForm, RegistrationOutcome};
    pub use crate::services::report::{self, Report, ReportRow};
}
