use std::collections::BTreeSet;

use crate::KanjiId;

/// One adapter's view of a single character.
///
/// Only `character` and `source_tag` are mandatory. Missing optional data is
/// absent (`None` / empty collection), never an empty-string placeholder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PartialRecord {
    pub character: char,
    pub source_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_readings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kun_readings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jlpt_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radicals: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confused_with: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl PartialRecord {
    pub fn new(character: char, source_tag: impl Into<String>) -> Self {
        Self {
            character,
            source_tag: source_tag.into(),
            meaning: None,
            on_readings: Vec::new(),
            kun_readings: Vec::new(),
            grade: None,
            stroke_count: None,
            jlpt_level: None,
            radicals: Vec::new(),
            categories: BTreeSet::new(),
            difficulty: None,
            confused_with: Vec::new(),
            examples: Vec::new(),
        }
    }
}

/// Display pair for a record's representative radical.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RadicalInfo {
    pub name: String,
    pub meaning: String,
}

impl RadicalInfo {
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let meaning = format!("{name} radical");
        Self { name, meaning }
    }
}

/// One canonical record per unique character, the merge engine's output.
///
/// `categories` and `sources` are set unions over every contributing partial
/// record; scalar fields hold the highest-priority non-null contribution.
/// Collections are ordered so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MasterRecord {
    pub kanji: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<KanjiId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kun: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jlpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical: Option<RadicalInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radicals: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub category: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub sources: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "confusedWith")]
    pub confused_with: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl MasterRecord {
    pub fn new(kanji: char) -> Self {
        Self {
            kanji,
            id: None,
            meaning: None,
            on: Vec::new(),
            kun: Vec::new(),
            grade: None,
            strokes: None,
            jlpt: None,
            radical: None,
            radicals: Vec::new(),
            category: BTreeSet::new(),
            sources: BTreeSet::new(),
            difficulty: None,
            confused_with: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Whether the record carries a usable radical assignment: a non-empty
    /// radical name either on `radical` or in the `radicals` list.
    pub fn has_radical(&self) -> bool {
        if let Some(info) = &self.radical
            && !info.name.trim().is_empty()
        {
            return true;
        }
        self.radicals.iter().any(|name| !name.trim().is_empty())
    }

    pub fn codepoint(&self) -> u32 {
        self.kanji as u32
    }
}
