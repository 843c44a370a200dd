//! Identifier assignment over merged master records.

use std::collections::BTreeMap;

use tracing::warn;

use kanji_model::{KanjiId, MasterRecord};

/// Result of the id-assignment pass.
#[derive(Debug, Default)]
pub struct IdAssignment {
    pub assigned: usize,
    /// Identifiers shared by more than one record. Two distinct characters
    /// mapping to one id means a codepoint was computed from the wrong
    /// character upstream; surfaced as a warning, never silently renamed.
    pub duplicates: Vec<KanjiId>,
}

/// Assign `u<hex-codepoint>` identifiers to every record, then scan the full
/// id set for duplicates. Purely additive: no other field is touched.
pub fn assign_ids(records: &mut [MasterRecord]) -> IdAssignment {
    let mut counts: BTreeMap<KanjiId, usize> = BTreeMap::new();
    let mut assignment = IdAssignment::default();

    for record in records.iter_mut() {
        let id = KanjiId::from_char(record.kanji);
        *counts.entry(id.clone()).or_insert(0) += 1;
        record.id = Some(id);
        assignment.assigned += 1;
    }

    assignment.duplicates = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect();
    for id in &assignment.duplicates {
        warn!(%id, "duplicate identifier after assignment");
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::assign_ids;
    use kanji_model::MasterRecord;

    #[test]
    fn assigns_codepoint_ids() {
        let mut records = vec![MasterRecord::new('山'), MasterRecord::new('川')];
        let assignment = assign_ids(&mut records);
        assert_eq!(assignment.assigned, 2);
        assert!(assignment.duplicates.is_empty());
        assert_eq!(records[0].id.as_ref().unwrap().as_str(), "u5c71");
        assert_eq!(records[1].id.as_ref().unwrap().as_str(), "u5ddd");
    }

    #[test]
    fn duplicate_characters_surface_as_id_duplicates() {
        // Merge guarantees unique characters; a duplicate here models the
        // upstream bug the scan exists to catch.
        let mut records = vec![MasterRecord::new('山'), MasterRecord::new('山')];
        let assignment = assign_ids(&mut records);
        assert_eq!(assignment.duplicates.len(), 1);
        assert_eq!(assignment.duplicates[0].as_str(), "u5c71");
    }

    #[test]
    fn assignment_touches_only_the_id_field() {
        let mut record = MasterRecord::new('水');
        record.meaning = Some("water".to_string());
        record.category.insert("exam".to_string());
        let before_meaning = record.meaning.clone();
        let before_category = record.category.clone();

        let mut records = vec![record];
        assign_ids(&mut records);
        assert_eq!(records[0].meaning, before_meaning);
        assert_eq!(records[0].category, before_category);
    }
}
