#![deny(unsafe_code)]

pub mod audit;
pub mod autofix;
pub mod table;

pub use crate::audit::{RadicalAudit, audit};
pub use crate::autofix::{FixLogEntry, FixOutcome, fix};
pub use crate::table::{RadicalEntry, RadicalTable, display_name};
