use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kanji_cli::pipeline::{
    BuildOptions, BuildReport, CANONICAL_FILE, DataPaths, asset_ids, load_dataset, run_build,
};
use kanji_fetch::{FetchConfig, FetchSummary, HttpAssetSource, fetch_assets};
use kanji_ingest::load_official_list;
use kanji_model::CoverageReport;
use kanji_radical::{RadicalAudit, RadicalTable, audit};
use kanji_verify::verify;

use crate::cli::{BuildArgs, DataArgs, FetchArgs};

pub fn run_build_command(args: &BuildArgs) -> Result<BuildReport> {
    let mut options = BuildOptions::new(&args.data_dir);
    options.output_dir = args.output_dir.clone();
    options.skip_fix = args.skip_fix;
    options.dry_run = args.dry_run;
    if !args.sources.is_empty() {
        options.sources = args.sources.iter().map(|s| s.kind()).collect();
        options.sources.sort();
        options.sources.dedup();
    }
    run_build(&options)
}

/// Coverage check over a previously built canonical artifact.
pub fn run_coverage(args: &DataArgs) -> Result<CoverageReport> {
    let paths = DataPaths::new(&args.data_dir);
    let dataset_path = args.data_dir.join(CANONICAL_FILE);
    let records = load_dataset(&dataset_path)
        .with_context(|| format!("no built dataset at {}; run build first", dataset_path.display()))?;
    let official = load_official_list(&paths.official_list()).context("load official list")?;
    Ok(verify(&official, &records))
}

/// Radical audit over a previously built canonical artifact.
pub fn run_radicals(args: &DataArgs) -> Result<RadicalAudit> {
    let dataset_path = args.data_dir.join(CANONICAL_FILE);
    let records = load_dataset(&dataset_path)
        .with_context(|| format!("no built dataset at {}; run build first", dataset_path.display()))?;
    Ok(audit(&records, RadicalTable::embedded()))
}

/// Download stroke-order assets for every record in the built dataset.
///
/// Idempotent: assets already on disk are skipped, so an interrupted run can
/// simply be rerun.
pub fn run_fetch(args: &FetchArgs) -> Result<FetchSummary> {
    let dataset_path = args.data_dir.join(CANONICAL_FILE);
    let records = load_dataset(&dataset_path)
        .with_context(|| format!("no built dataset at {}; run build first", dataset_path.display()))?;
    let mut ids = asset_ids(&records);
    if let Some(limit) = args.limit {
        ids.truncate(limit);
    }

    let assets_dir = args
        .assets_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join("svg"));
    let config = FetchConfig::new(&args.base_url, assets_dir)
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_retries(args.retries);

    let span = info_span!("fetch", asset_count = ids.len());
    let _guard = span.enter();
    info!(
        base_url = %config.base_url,
        output_dir = %config.output_dir.display(),
        "fetching stroke-order assets"
    );
    let source = HttpAssetSource::new(&config).context("build http client")?;
    let cancel = AtomicBool::new(false);
    fetch_assets(&source, &config, &ids, &cancel).context("fetch assets")
}
