//! The adapter contract shared by every raw-data origin.
//!
//! Each adapter turns one loosely-structured source file into a sequence of
//! [`PartialRecord`]s tagged with that source's identity. Adapters are
//! independent and order-insensitive; none may assume another has run.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use kanji_model::{PartialRecord, SourceKind};

use crate::error::{IngestError, Result};

/// Capability interface over the interchangeable source-normalization
/// strategies. New sources plug in here without touching the merge engine.
pub trait SourceAdapter {
    fn kind(&self) -> SourceKind;

    /// Normalize raw source text into partial records.
    ///
    /// Malformed individual entries are skipped with a logged warning; a
    /// structurally unparseable source is an error, since downstream stages
    /// assume every declared source is fully present or explicitly disabled.
    fn normalize(&self, raw: &str) -> Result<Normalized>;
}

/// What one adapter produced from raw source text.
#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<PartialRecord>,
    /// Entries skipped because they were individually malformed.
    pub skipped: usize,
}

/// Normalized output of one source file, with adapter-level findings.
#[derive(Debug)]
pub struct SourceRecords {
    pub kind: SourceKind,
    pub records: Vec<PartialRecord>,
    /// Entries skipped because they were individually malformed.
    pub skipped: usize,
    /// Characters that appeared more than once within this single source.
    /// A data-integrity warning, not a merge concern.
    pub duplicates: Vec<char>,
}

/// Read and normalize one declared source file.
///
/// An unreadable file is fatal for the whole build.
pub fn read_source(adapter: &dyn SourceAdapter, path: &Path) -> Result<SourceRecords> {
    let kind = adapter.kind();
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Normalized { records, skipped } = adapter.normalize(&raw)?;
    let duplicates = duplicate_characters(&records);
    if !duplicates.is_empty() {
        warn!(
            source_tag = %kind,
            duplicate_count = duplicates.len(),
            "duplicate characters within a single source"
        );
    }
    debug!(
        source_tag = %kind,
        path = %path.display(),
        record_count = records.len(),
        skipped,
        "source normalized"
    );
    Ok(SourceRecords {
        kind,
        records,
        skipped,
        duplicates,
    })
}

fn duplicate_characters(records: &[PartialRecord]) -> Vec<char> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.character).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(character, _)| character)
        .collect()
}

/// Accept a raw `kanji` field only when it is exactly one Unicode scalar
/// value. Multi-character strings are the classic upstream bug behind
/// duplicate identifiers, so they are rejected at the adapter boundary.
pub(crate) fn single_character(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(first)
}

/// Drop empty or whitespace-only strings; absent, not "explicitly cleared".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{non_blank, single_character};

    #[test]
    fn single_character_rejects_multi_char_strings() {
        assert_eq!(single_character("山"), Some('山'));
        assert_eq!(single_character("山川"), None);
        assert_eq!(single_character(""), None);
    }

    #[test]
    fn non_blank_treats_whitespace_as_absent() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
