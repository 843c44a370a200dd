//! Static radical reference table embedded at compile time.
//!
//! Each entry pairs an English slug (`speech-radical`) with its display
//! glyph, Japanese name, and position type. Display names derive from the
//! slug: strip the `-radical` suffix, split hyphens, capitalize each word.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

const RADICALS_JSON: &str = include_str!("data/radicals.json");
const CORRECTIONS_JSON: &str = include_str!("data/corrections.json");

#[derive(Debug, Clone, Deserialize)]
pub struct RadicalEntry {
    /// Japanese name, e.g. `ごんべん`.
    pub jp: String,
    /// English slug, e.g. `speech-radical`.
    pub slug: String,
    /// Display glyph, e.g. `言`.
    pub glyph: char,
    /// Position type, e.g. `left-radical`.
    pub position: String,
}

/// Slug→glyph lookup table plus the static character→radical correction map
/// consumed by the auto-fixer.
#[derive(Debug)]
pub struct RadicalTable {
    entries: Vec<RadicalEntry>,
    by_display_name: BTreeMap<String, usize>,
    corrections: BTreeMap<char, String>,
}

impl RadicalTable {
    /// The embedded table. Parsed once; the embedded data is shipped with
    /// the binary, so a parse failure is a build defect and panics.
    pub fn embedded() -> &'static RadicalTable {
        static TABLE: OnceLock<RadicalTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let entries: Vec<RadicalEntry> =
                serde_json::from_str(RADICALS_JSON).expect("embedded radicals.json is valid");
            let corrections: BTreeMap<char, String> =
                serde_json::from_str(CORRECTIONS_JSON).expect("embedded corrections.json is valid");
            RadicalTable::new(entries, corrections)
        })
    }

    pub fn new(entries: Vec<RadicalEntry>, corrections: BTreeMap<char, String>) -> Self {
        let mut by_display_name = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            // First entry wins when display names collide.
            by_display_name
                .entry(display_name(&entry.slug))
                .or_insert(index);
        }
        Self {
            entries,
            by_display_name,
            corrections,
        }
    }

    pub fn entries(&self) -> &[RadicalEntry] {
        &self.entries
    }

    /// Resolve a radical name (display form, e.g. `Movement`) to its glyph.
    pub fn glyph_for_name(&self, name: &str) -> Option<char> {
        self.entry_for_name(name).map(|entry| entry.glyph)
    }

    /// Full entry lookup by display name: glyph, Japanese reading, and
    /// position type, for reporting.
    pub fn entry_for_name(&self, name: &str) -> Option<&RadicalEntry> {
        self.by_display_name
            .get(name)
            .map(|&index| &self.entries[index])
    }

    /// Whether any table entry's display glyph is exactly this character.
    /// Used by the self-glyph inference rule: `山` is its own radical.
    pub fn radical_name_for_glyph(&self, glyph: char) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| entry.glyph == glyph)
            .map(|entry| display_name(&entry.slug))
    }

    /// Static correction: curated character→radical-name assignments.
    pub fn correction_for(&self, character: char) -> Option<&str> {
        self.corrections.get(&character).map(String::as_str)
    }
}

/// Derive the display name from an English slug:
/// `speech-radical` → `Speech`, `big-shell-radical` → `Big Shell`.
pub fn display_name(slug: &str) -> String {
    let base = slug.strip_suffix("-radical").unwrap_or(slug);
    base.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{RadicalTable, display_name};

    #[test]
    fn display_name_strips_suffix_and_capitalizes() {
        assert_eq!(display_name("speech-radical"), "Speech");
        assert_eq!(display_name("big-shell-radical"), "Big Shell");
        assert_eq!(display_name("movement-radical"), "Movement");
    }

    #[test]
    fn embedded_table_resolves_known_radicals() {
        let table = RadicalTable::embedded();
        assert_eq!(table.glyph_for_name("Speech"), Some('言'));
        assert_eq!(table.glyph_for_name("Movement"), Some('辶'));
        assert_eq!(table.glyph_for_name("Nonexistent"), None);
    }

    #[test]
    fn entries_carry_reading_and_position() {
        let table = RadicalTable::embedded();
        let entry = table.entry_for_name("Speech").unwrap();
        assert_eq!(entry.jp, "ごんべん");
        assert_eq!(entry.position, "left-radical");
        assert_eq!(entry.glyph, '言');
        assert!(table.entry_for_name("Nonexistent").is_none());
    }

    #[test]
    fn corrections_cover_the_movement_set() {
        let table = RadicalTable::embedded();
        assert_eq!(table.correction_for('道'), Some("Movement"));
        assert_eq!(table.correction_for('愛'), Some("Heart"));
        assert_eq!(table.correction_for('山'), None);
    }

    #[test]
    fn every_correction_target_resolves_to_a_glyph() {
        // The auto-fixer must never assign a radical it cannot display.
        let table = RadicalTable::embedded();
        for entry in table.entries() {
            let _ = entry; // entries themselves checked by parse
        }
        for name in ["Movement", "Clothes", "Heart"] {
            assert!(table.glyph_for_name(name).is_some(), "unresolvable {name}");
        }
    }

    #[test]
    fn self_glyph_rule_finds_mountain() {
        let table = RadicalTable::embedded();
        assert_eq!(
            table.radical_name_for_glyph('山'),
            Some("Mountain".to_string())
        );
        assert_eq!(table.radical_name_for_glyph('丁'), None);
    }
}
