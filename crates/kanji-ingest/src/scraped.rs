//! Adapters for the scraped flat lists (exam frequency, common mistakes,
//! confusable pairs). All three share one raw entry shape and differ only in
//! source identity and the confusable-partner extraction.

use serde::Deserialize;
use tracing::warn;

use kanji_model::{PartialRecord, SourceKind};

use crate::adapter::{Normalized, SourceAdapter, non_blank, single_character};
use crate::error::{IngestError, Result};

/// Marker prefix the confusable scraper uses inside `examples` to name the
/// partner character, e.g. `"混同: 未"`.
const CONFUSED_MARKER: &str = "混同:";

/// Raw shape of one scraped list entry.
#[derive(Debug, Deserialize)]
struct ScrapedEntry {
    kanji: String,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    reading: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<u8>,
    #[serde(default)]
    examples: Vec<String>,
}

fn normalize_scraped(kind: SourceKind, raw: &str, category: &str) -> Result<Normalized> {
    let tag = kind.tag();
    let values: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|source| IngestError::ParseSource {
            source_tag: tag.to_string(),
            source,
        })?;

    let mut normalized = Normalized::default();
    for (index, value) in values.into_iter().enumerate() {
        let entry: ScrapedEntry = match serde_json::from_value(value) {
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
        if let Some(reading) = non_blank(entry.reading) {
            record.kun_readings.push(reading);
        }
        record
            .categories
            .insert(non_blank(entry.category).unwrap_or_else(|| category.to_string()));
        record.difficulty = entry.difficulty;

        for example in entry.examples {
            let example = example.trim().to_string();
            if example.is_empty() {
                continue;
            }
            if let Some(partner) = example.strip_prefix(CONFUSED_MARKER) {
                let partner = partner.trim();
                if let Some(partner_char) = single_character(partner) {
                    record.confused_with.push(partner_char.to_string());
                    continue;
                }
            }
            record.examples.push(example);
        }
        normalized.records.push(record);
    }
    Ok(normalized)
}

/// Exam-frequency list scraped from education sources.
#[derive(Debug, Default)]
pub struct ExamListAdapter;

impl SourceAdapter for ExamListAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::ExamList
    }

    fn normalize(&self, raw: &str) -> Result<Normalized> {
        normalize_scraped(self.kind(), raw, "exam")
    }
}

/// Commonly-miswritten kanji list.
#[derive(Debug, Default)]
pub struct MistakeListAdapter;

impl SourceAdapter for MistakeListAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::MistakeList
    }

    fn normalize(&self, raw: &str) -> Result<Normalized> {
        normalize_scraped(self.kind(), raw, "mistake")
    }
}

/// Confusable-pair list; extracts the partner character from the `混同:`
/// example marker.
#[derive(Debug, Default)]
pub struct ConfusedListAdapter;

impl SourceAdapter for ConfusedListAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::ConfusedList
    }

    fn normalize(&self, raw: &str) -> Result<Normalized> {
        normalize_scraped(self.kind(), raw, "confused")
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfusedListAdapter, ExamListAdapter};
    use crate::adapter::SourceAdapter;

    #[test]
    fn exam_entries_default_to_exam_category() {
        let raw = r#"[{ "kanji": "権", "meaning": "authority, right", "source": "bunka.go.jp" }]"#;
        let normalized = ExamListAdapter.normalize(raw).unwrap();
        let record = &normalized.records[0];
        assert!(record.categories.contains("exam"));
        assert_eq!(record.source_tag, "exam-list");
    }

    #[test]
    fn confused_marker_becomes_partner_not_example() {
        let raw = r#"[{
            "kanji": "末",
            "category": "confused",
            "examples": ["混同: 未", "末期"]
        }]"#;
        let normalized = ConfusedListAdapter.normalize(raw).unwrap();
        let record = &normalized.records[0];
        assert_eq!(record.confused_with, vec!["未".to_string()]);
        assert_eq!(record.examples, vec!["末期".to_string()]);
    }

    #[test]
    fn reading_maps_into_kun_readings() {
        let raw = r#"[{ "kanji": "穏", "reading": "おだ(やか)" }]"#;
        let normalized = ExamListAdapter.normalize(raw).unwrap();
        assert_eq!(
            normalized.records[0].kun_readings,
            vec!["おだ(やか)".to_string()]
        );
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let raw = r#"[{ "kanji": "穏" }, { "kanji": 42 }]"#;
        let normalized = ExamListAdapter.normalize(raw).unwrap();
        assert_eq!(normalized.records.len(), 1);
        assert_eq!(normalized.skipped, 1);
    }
}
