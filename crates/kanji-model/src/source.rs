use std::fmt;

/// Known raw-data origins, in fixed merge-priority order.
///
/// The discriminant order is the trust order: the curated master list wins
/// scalar-field conflicts against every scraped source, and scraped sources
/// resolve among themselves in the order listed here. List-valued fields
/// accumulate regardless of priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum SourceKind {
    CuratedMaster,
    ExamList,
    MistakeList,
    ConfusedList,
}

impl SourceKind {
    /// Stable tag recorded in provenance sets and log messages.
    pub fn tag(self) -> &'static str {
        match self {
            Self::CuratedMaster => "curated-master",
            Self::ExamList => "exam-list",
            Self::MistakeList => "mistake-list",
            Self::ConfusedList => "confused-list",
        }
    }

    /// Merge priority; lower wins scalar conflicts.
    pub fn priority(self) -> u8 {
        match self {
            Self::CuratedMaster => 0,
            Self::ExamList => 1,
            Self::MistakeList => 2,
            Self::ConfusedList => 3,
        }
    }

    /// Resolve a provenance tag back to its source, if known.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn all() -> [SourceKind; 4] {
        [
            Self::CuratedMaster,
            Self::ExamList,
            Self::MistakeList,
            Self::ConfusedList,
        ]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of the closed official (Joyo) reference list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OfficialListEntry {
    pub kanji: char,
    #[serde(rename = "ucsHex")]
    pub ucs_hex: String,
    pub grade: u8,
    pub strokes: u8,
}
