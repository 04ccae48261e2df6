pub mod registration;
pub mod report;

pub use registration::{PendingRegistration, RegistrationForm, RegistrationOutcome};
pub use report::{CsvExport, Report, ReportRow};
