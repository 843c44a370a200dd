//! Dataset build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read and normalize every enabled source file
//! 2. **Merge**: Fold partial records into one master record per character
//! 3. **Identify**: Assign `u<hex-codepoint>` identifiers
//! 4. **Emit**: Write the canonical dataset artifact
//! 5. **Radicals**: Audit assignments, infer repairs into a separate artifact
//! 6. **Coverage**: Diff the dataset against the official list
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Structural failures (unreadable or unparseable sources) abort the
//! build; data-integrity findings accumulate into the final report instead.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{info, info_span};

use kanji_ingest::{
    ConfusedListAdapter, CuratedMasterAdapter, ExamListAdapter, MistakeListAdapter,
    load_official_list, read_source,
};
use kanji_merge::{assign_ids, merge};
use kanji_model::{CoverageReport, KanjiId, MasterRecord, PartialRecord, SourceKind};
use kanji_radical::{RadicalAudit, RadicalTable, audit, fix};
use kanji_verify::verify;

/// Canonical dataset artifact, owned by the merge stage.
pub const CANONICAL_FILE: &str = "kanji_master.json";
/// Repaired dataset artifact, owned by the radical auto-fixer. Written next
/// to the canonical artifact, never over it.
pub const FIXED_FILE: &str = "kanjiMaster_fixed.json";

/// Conventional file layout of one data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Input file for one declared source.
    pub fn source_file(&self, kind: SourceKind) -> PathBuf {
        let name = match kind {
            SourceKind::CuratedMaster => "kanji-dictionary.json",
            SourceKind::ExamList => "kanji_exam.json",
            SourceKind::MistakeList => "kanji_mistake.json",
            SourceKind::ConfusedList => "kanji_confused.json",
        };
        self.data_dir.join(name)
    }

    /// The official standard-character list, the coverage baseline.
    pub fn official_list(&self) -> PathBuf {
        self.data_dir.join("kanji-joyo.json")
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Per-source accounting from the ingest stage.
#[derive(Debug)]
pub struct SourceReport {
    pub kind: SourceKind,
    pub records: usize,
    /// Entries skipped because they were individually malformed.
    pub skipped: usize,
    /// Characters appearing more than once within this single source.
    pub duplicates: Vec<char>,
}

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestOutcome {
    pub sources: Vec<SourceReport>,
    pub partials: Vec<PartialRecord>,
}

/// Read and normalize every enabled source file.
///
/// An unreadable or unparseable source aborts the build; individually
/// malformed entries and within-source duplicates are accumulated as
/// warnings in the per-source reports.
pub fn ingest(paths: &DataPaths, enabled: &[SourceKind]) -> Result<IngestOutcome> {
    let span = info_span!("ingest", data_dir = %paths.data_dir().display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut sources = Vec::new();
    let mut partials = Vec::new();
    for kind in enabled {
        let path = paths.source_file(*kind);
        let mut loaded = match kind {
            SourceKind::CuratedMaster => read_source(&CuratedMasterAdapter, &path),
            SourceKind::ExamList => read_source(&ExamListAdapter, &path),
            SourceKind::MistakeList => read_source(&MistakeListAdapter, &path),
            SourceKind::ConfusedList => read_source(&ConfusedListAdapter, &path),
        }
        .with_context(|| format!("ingest {} from {}", kind.tag(), path.display()))?;

        sources.push(SourceReport {
            kind: *kind,
            records: loaded.records.len(),
            skipped: loaded.skipped,
            duplicates: std::mem::take(&mut loaded.duplicates),
        });
        partials.append(&mut loaded.records);
    }

    info!(
        source_count = sources.len(),
        partial_count = partials.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestOutcome { sources, partials })
}

// ============================================================================
// Stages 2-6: Full build
// ============================================================================

/// Options controlling one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub data_dir: PathBuf,
    /// Directory receiving the artifacts (default: the data directory).
    pub output_dir: Option<PathBuf>,
    /// Enabled sources, in any order; the merge fold uses source priority,
    /// not ingest order.
    pub sources: Vec<SourceKind>,
    /// Audit radicals but skip the inference pass and its artifact.
    pub skip_fix: bool,
    /// Run every stage without writing artifacts.
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: None,
            sources: SourceKind::all().to_vec(),
            skip_fix: false,
            dry_run: false,
        }
    }
}

/// Result of one full build run.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub canonical_path: PathBuf,
    /// Absent when the fix pass was skipped.
    pub fixed_path: Option<PathBuf>,
    /// SHA-256 of the canonical artifact; absent on dry runs.
    pub canonical_sha256: Option<String>,
    pub sources: Vec<SourceReport>,
    pub partial_count: usize,
    pub record_count: usize,
    /// Identifiers shared by more than one record (upstream data defect).
    pub duplicate_ids: Vec<KanjiId>,
    pub audit: RadicalAudit,
    pub fixed_count: usize,
    /// Characters the fix pass could not justify a radical for.
    pub unfixed: Vec<char>,
    pub coverage: CoverageReport,
    pub dry_run: bool,
}

/// Run the full build: ingest, merge, identify, emit, radicals, coverage.
pub fn run_build(options: &BuildOptions) -> Result<BuildReport> {
    let paths = DataPaths::new(&options.data_dir);
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| options.data_dir.clone());

    let IngestOutcome { sources, partials } = ingest(&paths, &options.sources)?;
    let partial_count = partials.len();

    let merge_span = info_span!("merge");
    let (mut records, assignment) = merge_span.in_scope(|| {
        let outcome = merge(partials);
        let mut records = outcome.records;
        let assignment = assign_ids(&mut records);
        (records, assignment)
    });
    info!(
        record_count = records.len(),
        assigned = assignment.assigned,
        duplicate_ids = assignment.duplicates.len(),
        "merge complete"
    );

    let canonical_path = output_dir.join(CANONICAL_FILE);
    let canonical_sha256 = if options.dry_run {
        None
    } else {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        let digest = write_artifact(&canonical_path, &records)?;
        info!(path = %canonical_path.display(), sha256 = %digest, "canonical artifact written");
        Some(digest)
    };

    let table = RadicalTable::embedded();
    let radical_span = info_span!("radicals");
    let (audit_report, fixed_path, fixed_count, unfixed) =
        radical_span.in_scope(|| -> Result<_> {
            let audit_report = audit(&records, table);
            if options.skip_fix {
                let missing = audit_report.missing.clone();
                return Ok((audit_report, None, 0, missing));
            }
            let outcome = fix(&records, table);
            let path = output_dir.join(FIXED_FILE);
            if !options.dry_run {
                let digest = write_artifact(&path, &outcome.records)?;
                info!(path = %path.display(), sha256 = %digest, "fixed artifact written");
            }
            Ok((audit_report, Some(path), outcome.fixed.len(), outcome.unfixed))
        })?;

    let official = load_official_list(&paths.official_list()).context("load official list")?;
    let coverage = verify(&official, &records);

    Ok(BuildReport {
        output_dir,
        canonical_path,
        fixed_path,
        canonical_sha256,
        sources,
        partial_count,
        record_count: records.len(),
        duplicate_ids: assignment.duplicates,
        audit: audit_report,
        fixed_count,
        unfixed,
        coverage,
        dry_run: options.dry_run,
    })
}

// ============================================================================
// Artifact helpers
// ============================================================================

/// Serialize records to pretty JSON with a trailing newline and write them.
/// Returns the hex SHA-256 of the written bytes.
///
/// The serialized order is the record order (sorted by codepoint upstream),
/// so reruns over unchanged inputs are byte-identical.
pub fn write_artifact(path: &Path, records: &[MasterRecord]) -> Result<String> {
    let mut bytes = serde_json::to_vec_pretty(records).context("serialize dataset")?;
    bytes.push(b'\n');
    std::fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Load a previously built dataset artifact.
pub fn load_dataset(path: &Path) -> Result<Vec<MasterRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse dataset {}", path.display()))
}

/// Asset identifiers for a dataset: the record's assigned id, or one derived
/// from the character for records built before id assignment existed.
pub fn asset_ids(records: &[MasterRecord]) -> Vec<KanjiId> {
    records
        .iter()
        .map(|record| {
            record
                .id
                .clone()
                .unwrap_or_else(|| KanjiId::from_char(record.kanji))
        })
        .collect()
}
