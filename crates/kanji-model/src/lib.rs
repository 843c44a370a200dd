#![deny(unsafe_code)]

pub mod error;
pub mod id;
pub mod record;
pub mod report;
pub mod source;

pub use crate::error::ModelError;
pub use crate::id::KanjiId;
pub use crate::record::{MasterRecord, PartialRecord, RadicalInfo};
pub use crate::report::CoverageReport;
pub use crate::source::{OfficialListEntry, SourceKind};
