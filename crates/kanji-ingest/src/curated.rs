//! Adapter for the curated master list, the highest-trust source.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::warn;

use kanji_model::{PartialRecord, SourceKind};

use crate::adapter::{Normalized, SourceAdapter, non_blank, single_character};
use crate::error::{IngestError, Result};

/// Raw shape of one curated master entry.
#[derive(Debug, Deserialize)]
struct CuratedEntry {
    kanji: String,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    on: Vec<String>,
    #[serde(default)]
    kun: Vec<String>,
    #[serde(default)]
    grade: Option<u8>,
    #[serde(default)]
    strokes: Option<u8>,
    #[serde(default)]
    jlpt: Option<String>,
    #[serde(default)]
    radicals: Vec<String>,
    #[serde(default)]
    category: Vec<String>,
    #[serde(default)]
    difficulty: Option<u8>,
    #[serde(default, rename = "confusedWith")]
    confused_with: Vec<String>,
    #[serde(default)]
    examples: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CuratedMasterAdapter;

impl SourceAdapter for CuratedMasterAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::CuratedMaster
    }

    fn normalize(&self, raw: &str) -> Result<Normalized> {
        let tag = self.kind().tag();
        let values: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|source| IngestError::ParseSource {
                source_tag: tag.to_string(),
                source,
            })?;

        let mut normalized = Normalized::default();
        for (index, value) in values.into_iter().enumerate() {
            let entry: CuratedEntry = match serde_json::from_value(value) {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(source_tag = tag, index, %error, "skipping malformed entry");
                    normalized.skipped += 1;
                    continue;
                }
            };
            let Some(character) = single_character(entry.kanji.trim()) else {
                warn!(
                    source_tag = tag,
                    index,
                    kanji = %entry.kanji,
                    "skipping entry: not a single character"
                );
                normalized.skipped += 1;
                continue;
            };

            let mut record = PartialRecord::new(character, tag);
            record.meaning = non_blank(entry.meaning);
            record.on_readings = clean_list(entry.on);
            record.kun_readings = clean_list(entry.kun);
            record.grade = entry.grade;
            record.stroke_count = entry.strokes;
            record.jlpt_level = non_blank(entry.jlpt);
            record.radicals = clean_list(entry.radicals);
            record.categories = entry
                .category
                .into_iter()
                .filter(|c| !c.trim().is_empty())
                .collect::<BTreeSet<_>>();
            record.difficulty = entry.difficulty;
            record.confused_with = clean_list(entry.confused_with);
            record.examples = clean_list(entry.examples);
            normalized.records.push(record);
        }
        Ok(normalized)
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
