//! Missing-radical audit over the merged dataset.

use std::collections::BTreeMap;

use tracing::debug;

use kanji_model::MasterRecord;

use crate::table::{RadicalTable, display_name};

/// Grouping key for human triage: grade then stroke count, unknowns last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TriageKey {
    pub grade: Option<u8>,
    pub strokes: Option<u8>,
}

/// Result of one audit pass. Read-only over the input records.
#[derive(Debug, Default)]
pub struct RadicalAudit {
    /// Characters lacking a usable radical assignment, sorted by codepoint.
    pub missing: Vec<char>,
    /// The same characters grouped by grade/stroke count for triage.
    pub missing_by_triage: BTreeMap<TriageKey, Vec<char>>,
    /// Registered kanji count per radical display name, every table radical
    /// listed even at zero so sparse radicals are visible.
    pub per_radical_counts: BTreeMap<String, usize>,
}

impl RadicalAudit {
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// Radicals with no registered kanji at all.
    pub fn unused_radicals(&self) -> Vec<&str> {
        self.per_radical_counts
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Determine, for every record, whether it has a usable radical assignment:
/// a non-empty radical name that resolves to a display glyph in the table.
pub fn audit(records: &[MasterRecord], table: &RadicalTable) -> RadicalAudit {
    let mut result = RadicalAudit::default();
    for entry in table.entries() {
        result
            .per_radical_counts
            .entry(display_name(&entry.slug))
            .or_insert(0);
    }

    for record in records {
        if usable_radical(record, table) {
            for name in radical_names(record) {
                if let Some(count) = result.per_radical_counts.get_mut(&name) {
                    *count += 1;
                }
            }
        } else {
            result.missing.push(record.kanji);
            result
                .missing_by_triage
                .entry(TriageKey {
                    grade: record.grade,
                    strokes: record.strokes,
                })
                .or_default()
                .push(record.kanji);
        }
    }

    debug!(
        record_count = records.len(),
        missing_count = result.missing.len(),
        "radical audit complete"
    );
    result
}

fn usable_radical(record: &MasterRecord, table: &RadicalTable) -> bool {
    record.has_radical()
        && radical_names(record)
            .iter()
            .any(|name| table.glyph_for_name(name).is_some())
}

fn radical_names(record: &MasterRecord) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    if let Some(info) = &record.radical {
        let name = info.name.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    for name in &record.radicals {
        let name = name.trim();
        if !name.is_empty() && !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{TriageKey, audit};
    use crate::table::RadicalTable;
    use kanji_model::{MasterRecord, RadicalInfo};

    #[test]
    fn record_with_resolvable_radical_is_not_flagged() {
        let mut record = MasterRecord::new('語');
        record.radical = Some(RadicalInfo::from_name("Speech"));
        let result = audit(&[record], RadicalTable::embedded());
        assert!(result.missing.is_empty());
        assert_eq!(result.per_radical_counts["Speech"], 1);
    }

    #[test]
    fn unresolvable_name_counts_as_missing() {
        let mut record = MasterRecord::new('謎');
        record.radicals = vec!["NotARadical".to_string()];
        let result = audit(&[record], RadicalTable::embedded());
        assert_eq!(result.missing, vec!['謎']);
    }

    #[test]
    fn missing_records_group_by_grade_and_strokes() {
        let mut a = MasterRecord::new('道');
        a.grade = Some(2);
        a.strokes = Some(12);
        let b = MasterRecord::new('謎');
        let result = audit(&[a, b], RadicalTable::embedded());

        let graded = TriageKey {
            grade: Some(2),
            strokes: Some(12),
        };
        let unknown = TriageKey {
            grade: None,
            strokes: None,
        };
        assert_eq!(result.missing_by_triage[&graded], vec!['道']);
        assert_eq!(result.missing_by_triage[&unknown], vec!['謎']);
    }

    #[test]
    fn every_table_radical_is_counted_even_at_zero() {
        let result = audit(&[], RadicalTable::embedded());
        assert!(result.per_radical_counts.values().all(|count| *count == 0));
        assert!(!result.unused_radicals().is_empty());
    }
}
