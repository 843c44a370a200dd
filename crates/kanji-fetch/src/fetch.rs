//! The asset-fetch loop: idempotent, rate-limited, independently retryable
//! per character.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, info, warn};

use kanji_model::KanjiId;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};

/// Seam over the remote host so the loop is testable without a network.
/// `Ok(None)` is "asset does not exist"; `Err` is a transient failure.
pub trait AssetSource {
    fn get(&self, url: &str) -> Result<Option<String>>;
}

/// Accounting for one fetch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: usize,
    /// Assets already on disk; never re-downloaded or overwritten.
    pub skipped: usize,
    /// Assets the remote host does not have, or that exhausted retries.
    pub failed: usize,
    /// True when the run stopped early on the cancellation flag.
    pub cancelled: bool,
}

/// Fetch one stroke-order asset per identifier into the output directory.
///
/// Each fetch is independent: a failure is counted and the loop moves on.
/// Cancellation is cooperative, checked between items, never mid-transfer;
/// already-completed files are left intact.
pub fn fetch_assets(
    source: &dyn AssetSource,
    config: &FetchConfig,
    ids: &[KanjiId],
    cancel: &AtomicBool,
) -> Result<FetchSummary> {
    std::fs::create_dir_all(&config.output_dir).map_err(|error| FetchError::CreateDir {
        path: config.output_dir.clone(),
        source: error,
    })?;

    let mut summary = FetchSummary::default();
    for id in ids {
        if cancel.load(Ordering::Relaxed) {
            summary.cancelled = true;
            break;
        }

        let output_path = asset_path(config, id);
        if output_path.exists() {
            summary.skipped += 1;
            continue;
        }

        match fetch_one(source, config, id)? {
            Some(body) => {
                std::fs::write(&output_path, body).map_err(|error| FetchError::Write {
                    path: output_path.clone(),
                    source: error,
                })?;
                debug!(id = %id, path = %output_path.display(), "asset downloaded");
                summary.downloaded += 1;
            }
            None => {
                warn!(id = %id, "asset unavailable");
                summary.failed += 1;
            }
        }
    }

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "fetch complete"
    );
    Ok(summary)
}

/// Destination file for one identifier: `<output_dir>/<id>.svg`.
pub fn asset_path(config: &FetchConfig, id: &KanjiId) -> PathBuf {
    config.output_dir.join(format!("{id}.svg"))
}

/// Try the five-digit zero-padded name first, then the bare four-digit form
/// some mirrors use. Transient errors retry a bounded number of times with
/// the configured inter-request delay; `Ok(None)` means the asset genuinely
/// is not there.
fn fetch_one(
    source: &dyn AssetSource,
    config: &FetchConfig,
    id: &KanjiId,
) -> Result<Option<String>> {
    let padded = format!("{:0>5}", id.hex());
    let mut candidates = vec![format!("{}/{padded}.svg", config.base_url)];
    if padded != id.hex() {
        candidates.push(format!("{}/{}.svg", config.base_url, id.hex()));
    }

    for attempt in 0..=config.retries {
        if attempt > 0 {
            thread::sleep(config.delay);
        }
        let mut transient_failure = false;
        for url in &candidates {
            match source.get(url) {
                Ok(Some(body)) => {
                    throttle(config);
                    return Ok(Some(body));
                }
                Ok(None) => {
                    throttle(config);
                }
                Err(error) => {
                    warn!(id = %id, attempt, %error, "fetch attempt failed");
                    throttle(config);
                    transient_failure = true;
                }
            }
        }
        if !transient_failure {
            // Every candidate answered 404; retrying will not help.
            return Ok(None);
        }
    }
    // Retries exhausted on transient errors; count as failed, do not abort.
    Ok(None)
}

fn throttle(config: &FetchConfig) {
    if !config.delay.is_zero() {
        thread::sleep(config.delay);
    }
}
