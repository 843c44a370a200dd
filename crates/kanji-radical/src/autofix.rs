//! Deterministic radical auto-fix.
//!
//! A pure transform over the merged records: flagged records are repaired
//! only when an inference rule justifies the assignment, and the result is
//! always a new collection. The orchestrator persists it to a separate
//! artifact; the canonical input is never mutated by this pass.

use tracing::{debug, info};

use kanji_model::{MasterRecord, RadicalInfo};

use crate::table::RadicalTable;

/// One successful repair, for the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixLogEntry {
    pub kanji: char,
    pub radical: String,
    pub rule: FixRule,
}

/// Which inference rule justified an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixRule {
    /// Static character→radical correction map.
    CorrectionMap,
    /// The character itself is a radical root glyph in the table.
    SelfGlyph,
}

impl FixRule {
    pub fn label(self) -> &'static str {
        match self {
            Self::CorrectionMap => "correction-map",
            Self::SelfGlyph => "self-glyph",
        }
    }
}

/// Result of one auto-fix pass.
#[derive(Debug)]
pub struct FixOutcome {
    /// The repaired collection; same length and order as the input.
    pub records: Vec<MasterRecord>,
    pub fixed: Vec<FixLogEntry>,
    /// Characters still flagged after the pass. Left in place, never dropped.
    pub unfixed: Vec<char>,
}

/// Attempt deterministic radical inference for every record lacking a usable
/// assignment. A character no rule can justify stays flagged and unfixed.
pub fn fix(records: &[MasterRecord], table: &RadicalTable) -> FixOutcome {
    let mut fixed_records = Vec::with_capacity(records.len());
    let mut fixed = Vec::new();
    let mut unfixed = Vec::new();

    for record in records {
        let mut copy = record.clone();
        if !copy.has_radical() {
            match infer(copy.kanji, table) {
                Some((name, rule)) => {
                    apply(&mut copy, &name);
                    debug!(kanji = %copy.kanji, radical = %name, rule = rule.label(), "radical fixed");
                    fixed.push(FixLogEntry {
                        kanji: copy.kanji,
                        radical: name,
                        rule,
                    });
                }
                None => unfixed.push(copy.kanji),
            }
        }
        fixed_records.push(copy);
    }

    info!(
        fixed_count = fixed.len(),
        unfixed_count = unfixed.len(),
        "auto-fix complete"
    );
    FixOutcome {
        records: fixed_records,
        fixed,
        unfixed,
    }
}

fn infer(character: char, table: &RadicalTable) -> Option<(String, FixRule)> {
    if let Some(name) = table.correction_for(character) {
        return Some((name.to_string(), FixRule::CorrectionMap));
    }
    if let Some(name) = table.radical_name_for_glyph(character) {
        return Some((name, FixRule::SelfGlyph));
    }
    None
}

fn apply(record: &mut MasterRecord, name: &str) {
    record.radical = Some(RadicalInfo::from_name(name));
    if !record.radicals.iter().any(|existing| existing == name) {
        record.radicals.push(name.to_string());
        record.radicals.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::fix;
    use crate::table::RadicalTable;
    use kanji_model::{MasterRecord, RadicalInfo};

    #[test]
    fn correction_map_repairs_known_characters() {
        let records = vec![MasterRecord::new('道')];
        let outcome = fix(&records, RadicalTable::embedded());
        let fixed = &outcome.records[0];
        assert_eq!(fixed.radical.as_ref().unwrap().name, "Movement");
        assert!(fixed.radicals.contains(&"Movement".to_string()));
        assert_eq!(outcome.fixed.len(), 1);
        assert!(outcome.unfixed.is_empty());
    }

    #[test]
    fn self_glyph_rule_repairs_radical_roots() {
        let records = vec![MasterRecord::new('山')];
        let outcome = fix(&records, RadicalTable::embedded());
        assert_eq!(outcome.records[0].radical.as_ref().unwrap().name, "Mountain");
    }

    #[test]
    fn unjustifiable_characters_stay_flagged_and_present() {
        let records = vec![MasterRecord::new('丁')];
        let outcome = fix(&records, RadicalTable::embedded());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.unfixed, vec!['丁']);
        assert!(outcome.records[0].radical.is_none());
    }

    #[test]
    fn already_assigned_records_are_untouched() {
        let mut record = MasterRecord::new('道');
        record.radical = Some(RadicalInfo::from_name("Speech"));
        let outcome = fix(&[record.clone()], RadicalTable::embedded());
        assert_eq!(outcome.records[0], record);
        assert!(outcome.fixed.is_empty());
    }

    #[test]
    fn pass_is_pure_and_input_is_unchanged() {
        let records = vec![MasterRecord::new('道')];
        let before = records.clone();
        let _ = fix(&records, RadicalTable::embedded());
        assert_eq!(records, before);
    }
}
