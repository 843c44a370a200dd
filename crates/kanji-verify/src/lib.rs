#![deny(unsafe_code)]

//! Coverage verification: diff the merged dataset against the official
//! standard-character list in both directions.

use std::collections::BTreeSet;

use tracing::{info, warn};

use kanji_model::{CoverageReport, MasterRecord, OfficialListEntry};

/// Compute the coverage report for one verifier run.
///
/// `missing` is a completeness defect to fix before a release; `extra` is
/// informational. Neither fails the build, but the exact counts are part of
/// the build's observable contract and are logged every run.
pub fn verify(official: &[OfficialListEntry], records: &[MasterRecord]) -> CoverageReport {
    let official_set: BTreeSet<char> = official.iter().map(|entry| entry.kanji).collect();
    let registered_set: BTreeSet<char> = records.iter().map(|record| record.kanji).collect();

    let missing: Vec<char> = official_set.difference(&registered_set).copied().collect();
    let extra: Vec<char> = registered_set.difference(&official_set).copied().collect();

    let report = CoverageReport {
        total_official: official_set.len(),
        total_registered: registered_set.len(),
        missing,
        extra,
    };

    if report.is_complete() {
        info!(
            total_official = report.total_official,
            total_registered = report.total_registered,
            "full official-list coverage"
        );
    } else {
        warn!(
            total_official = report.total_official,
            total_registered = report.total_registered,
            missing_count = report.missing.len(),
            extra_count = report.extra.len(),
            "official-list coverage gap"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::verify;
    use kanji_model::{MasterRecord, OfficialListEntry};

    fn official(kanji: char, grade: u8) -> OfficialListEntry {
        OfficialListEntry {
            kanji,
            ucs_hex: format!("{:05x}", kanji as u32),
            grade,
            strokes: 0,
        }
    }

    #[test]
    fn reports_missing_and_extra() {
        let official_list = vec![official('山', 1), official('川', 1), official('丁', 3)];
        let records = vec![MasterRecord::new('山'), MasterRecord::new('川')];

        let report = verify(&official_list, &records);
        assert_eq!(report.missing, vec!['丁']);
        assert!(report.extra.is_empty());
        assert_eq!(report.total_official, 3);
        assert_eq!(report.total_registered, 2);
    }

    #[test]
    fn extra_characters_are_informational() {
        let official_list = vec![official('山', 1)];
        let records = vec![MasterRecord::new('山'), MasterRecord::new('謎')];

        let report = verify(&official_list, &records);
        assert!(report.missing.is_empty());
        assert_eq!(report.extra, vec!['謎']);
    }

    #[test]
    fn missing_plus_covered_equals_official_total() {
        let official_list = vec![official('山', 1), official('川', 1), official('丁', 3)];
        let records = vec![MasterRecord::new('山'), MasterRecord::new('海')];

        let report = verify(&official_list, &records);
        assert_eq!(
            report.missing.len() + report.covered(),
            report.total_official
        );
    }

    #[test]
    fn empty_inputs_produce_empty_report() {
        let report = verify(&[], &[]);
        assert_eq!(report.total_official, 0);
        assert_eq!(report.total_registered, 0);
        assert!(report.is_complete());
    }
}
