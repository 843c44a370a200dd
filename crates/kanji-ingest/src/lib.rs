#![deny(unsafe_code)]

pub mod adapter;
pub mod curated;
pub mod error;
pub mod official;
pub mod scraped;

pub use crate::adapter::{Normalized, SourceAdapter, SourceRecords, read_source};
pub use crate::curated::CuratedMasterAdapter;
pub use crate::error::{IngestError, Result};
pub use crate::official::load_official_list;
pub use crate::scraped::{ConfusedListAdapter, ExamListAdapter, MistakeListAdapter};
