//! Loader for the closed official (Joyo) reference list.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use kanji_model::OfficialListEntry;

use crate::adapter::single_character;
use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct RawOfficialEntry {
    kanji: String,
    #[serde(default, rename = "ucsHex")]
    ucs_hex: Option<String>,
    grade: u8,
    strokes: u8,
}

/// Load the official standard-character list.
///
/// The official list is the coverage baseline for the whole build, so an
/// unreadable or unparseable file is fatal. Duplicate characters are
/// collapsed (first occurrence wins) with a warning, matching the original
/// set-based coverage check.
pub fn load_official_list(path: &Path) -> Result<Vec<OfficialListEntry>> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<RawOfficialEntry> =
        serde_json::from_str(&raw).map_err(|source| IngestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut seen = std::collections::BTreeSet::new();
    let mut official = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let Some(kanji) = single_character(entry.kanji.trim()) else {
            warn!(
                index,
                kanji = %entry.kanji,
                "skipping official entry: not a single character"
            );
            continue;
        };
        if !seen.insert(kanji) {
            warn!(%kanji, "duplicate official entry; keeping first");
            continue;
        }
        let ucs_hex = entry
            .ucs_hex
            .filter(|hex| !hex.trim().is_empty())
            .unwrap_or_else(|| format!("{:05x}", kanji as u32));
        official.push(OfficialListEntry {
            kanji,
            ucs_hex,
            grade: entry.grade,
            strokes: entry.strokes,
        });
    }
    Ok(official)
}

#[cfg(test)]
mod tests {
    use super::load_official_list;
    use std::io::Write;

    #[test]
    fn loads_entries_and_backfills_hex() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "kanji": "山", "ucsHex": "05c71", "grade": 1, "strokes": 3 }},
                {{ "kanji": "川", "grade": 1, "strokes": 3 }}
            ]"#
        )
        .unwrap();
        let official = load_official_list(file.path()).unwrap();
        assert_eq!(official.len(), 2);
        assert_eq!(official[0].ucs_hex, "05c71");
        assert_eq!(official[1].ucs_hex, "05ddd");
    }

    #[test]
    fn duplicate_official_entries_keep_first() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "kanji": "山", "grade": 1, "strokes": 3 }},
                {{ "kanji": "山", "grade": 2, "strokes": 3 }}
            ]"#
        )
        .unwrap();
        let official = load_official_list(file.path()).unwrap();
        assert_eq!(official.len(), 1);
        assert_eq!(official[0].grade, 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_official_list(&dir.path().join("absent.json")).is_err());
    }
}
