pub mod common;
pub mod dates;
pub mod record;
pub mod severity;

pub use common::*;
pub use dates::*;
pub use record::*;
pub use severity::*;
