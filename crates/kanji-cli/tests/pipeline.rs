//! Integration tests for the full build pipeline.

use std::path::Path;

use kanji_cli::pipeline::{
    BuildOptions, CANONICAL_FILE, DataPaths, FIXED_FILE, ingest, load_dataset, run_build,
};
use kanji_model::SourceKind;

const DICTIONARY: &str = r#"[
    {
        "kanji": "山",
        "meaning": "mountain",
        "on": ["サン"],
        "kun": ["やま"],
        "grade": 1,
        "strokes": 3,
        "radicals": ["Mountain"]
    },
    {
        "kanji": "川",
        "meaning": "river",
        "kun": ["かわ"],
        "grade": 1,
        "strokes": 3
    },
    {
        "kanji": "道",
        "meaning": "road",
        "on": ["ドウ"],
        "grade": 2,
        "strokes": 12
    }
]"#;

const EXAM: &str = r#"[
    { "kanji": "山", "meaning": "mountain (exam)", "difficulty": 1 },
    { "kanji": "丁", "reading": "チョウ", "difficulty": 3 }
]"#;

const MISTAKE: &str = "[]";

const CONFUSED: &str = r#"[
    { "kanji": "末", "examples": ["混同: 未", "末期"] }
]"#;

const OFFICIAL: &str = r#"[
    { "kanji": "山", "grade": 1, "strokes": 3 },
    { "kanji": "川", "grade": 1, "strokes": 3 },
    { "kanji": "道", "grade": 2, "strokes": 12 },
    { "kanji": "丁", "grade": 3, "strokes": 2 },
    { "kanji": "一", "grade": 1, "strokes": 1 }
]"#;

fn write_fixtures(dir: &Path) {
    std::fs::write(dir.join("kanji-dictionary.json"), DICTIONARY).unwrap();
    std::fs::write(dir.join("kanji_exam.json"), EXAM).unwrap();
    std::fs::write(dir.join("kanji_mistake.json"), MISTAKE).unwrap();
    std::fs::write(dir.join("kanji_confused.json"), CONFUSED).unwrap();
    std::fs::write(dir.join("kanji-joyo.json"), OFFICIAL).unwrap();
}

#[test]
fn full_build_produces_both_artifacts_and_coverage() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let report = run_build(&BuildOptions::new(dir.path())).unwrap();

    assert_eq!(report.partial_count, 6);
    // 山 appears in two sources and merges into one record.
    assert_eq!(report.record_count, 5);
    assert!(report.duplicate_ids.is_empty());
    assert!(report.canonical_sha256.is_some());

    let records = load_dataset(&dir.path().join(CANONICAL_FILE)).unwrap();
    assert_eq!(records.len(), 5);
    // Sorted by codepoint: 丁 (u4e01) first.
    assert_eq!(records[0].kanji, '丁');
    let mountain = records.iter().find(|r| r.kanji == '山').unwrap();
    // Curated meaning wins over the exam list's.
    assert_eq!(mountain.meaning.as_deref(), Some("mountain"));
    assert_eq!(mountain.id.as_ref().map(|id| id.as_str()), Some("u5c71"));
    assert_eq!(mountain.sources.len(), 2);

    // Coverage runs against the canonical records; 一 only exists via the
    // confused list partner marker, never as a record, so it is missing.
    assert_eq!(report.coverage.total_official, 5);
    assert!(report.coverage.missing.contains(&'一'));
    assert!(report.coverage.extra.contains(&'末'));
}

#[test]
fn fix_pass_writes_separate_artifact_and_leaves_canonical_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    run_build(&BuildOptions::new(dir.path())).unwrap();

    let canonical = load_dataset(&dir.path().join(CANONICAL_FILE)).unwrap();
    let fixed = load_dataset(&dir.path().join(FIXED_FILE)).unwrap();

    // 道 has no radical in the sources; the canonical artifact keeps the gap
    // while the fixed artifact repairs it from the correction map.
    let canonical_road = canonical.iter().find(|r| r.kanji == '道').unwrap();
    assert!(!canonical_road.has_radical());
    let fixed_road = fixed.iter().find(|r| r.kanji == '道').unwrap();
    assert_eq!(
        fixed_road.radical.as_ref().map(|r| r.name.as_str()),
        Some("Movement")
    );
}

#[test]
fn rebuilding_unchanged_inputs_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let options = BuildOptions::new(dir.path());

    let first = run_build(&options).unwrap();
    let first_bytes = std::fs::read(dir.path().join(CANONICAL_FILE)).unwrap();
    let second = run_build(&options).unwrap();
    let second_bytes = std::fs::read(dir.path().join(CANONICAL_FILE)).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.canonical_sha256, second.canonical_sha256);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let mut options = BuildOptions::new(dir.path());
    options.dry_run = true;

    let report = run_build(&options).unwrap();

    assert!(report.canonical_sha256.is_none());
    assert!(!dir.path().join(CANONICAL_FILE).exists());
    assert!(!dir.path().join(FIXED_FILE).exists());
    // The in-memory stages still ran in full.
    assert_eq!(report.record_count, 5);
}

#[test]
fn missing_declared_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::remove_file(dir.path().join("kanji_exam.json")).unwrap();

    assert!(run_build(&BuildOptions::new(dir.path())).is_err());
}

#[test]
fn source_subset_restricts_the_build() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::remove_file(dir.path().join("kanji_exam.json")).unwrap();
    let mut options = BuildOptions::new(dir.path());
    options.sources = vec![SourceKind::CuratedMaster, SourceKind::ConfusedList];

    let report = run_build(&options).unwrap();

    assert_eq!(report.sources.len(), 2);
    // 丁 came only from the now-disabled exam list.
    assert!(report.coverage.missing.contains(&'丁'));
}

#[test]
fn skip_fix_leaves_gaps_unrepaired() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let mut options = BuildOptions::new(dir.path());
    options.skip_fix = true;

    let report = run_build(&options).unwrap();

    assert!(report.fixed_path.is_none());
    assert_eq!(report.fixed_count, 0);
    assert!(!dir.path().join(FIXED_FILE).exists());
    assert_eq!(report.unfixed, report.audit.missing);
}

#[test]
fn ingest_reports_per_source_counts() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let paths = DataPaths::new(dir.path());

    let outcome = ingest(&paths, &SourceKind::all()).unwrap();

    assert_eq!(outcome.sources.len(), 4);
    let curated = &outcome.sources[0];
    assert_eq!(curated.kind, SourceKind::CuratedMaster);
    assert_eq!(curated.records, 3);
    assert_eq!(curated.skipped, 0);
    assert!(curated.duplicates.is_empty());
    assert_eq!(outcome.partials.len(), 6);
}
