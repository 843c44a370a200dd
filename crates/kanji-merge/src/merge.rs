//! Fold all adapters' partial records into unified master records.
//!
//! Records are grouped by exact character equality and folded in fixed
//! adapter-priority order: the curated master list first, scraped sources
//! after, so a lower-trust source never overwrites a populated scalar field.
//! List-valued fields always accumulate via set union. Output is sorted by
//! codepoint and every collection is sorted, so identical inputs in any
//! iteration order serialize byte-identically.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use kanji_model::{MasterRecord, PartialRecord, RadicalInfo, SourceKind};

/// Result of one merge run.
#[derive(Debug)]
pub struct MergeOutcome {
    /// One record per unique character, sorted by codepoint.
    pub records: Vec<MasterRecord>,
    /// Total partial records consumed.
    pub partial_count: usize,
}

/// Merge partial records from all enabled adapters into master records.
///
/// The merge engine exclusively owns [`MasterRecord`] construction; the id
/// assigner and radical passes only add to what is built here.
pub fn merge(partials: Vec<PartialRecord>) -> MergeOutcome {
    let partial_count = partials.len();

    let mut groups: BTreeMap<char, Vec<PartialRecord>> = BTreeMap::new();
    for partial in partials {
        groups.entry(partial.character).or_default().push(partial);
    }

    let mut records = Vec::with_capacity(groups.len());
    for (character, mut group) in groups {
        // Stable sort keeps input order among equal-priority contributions.
        group.sort_by_key(|partial| priority_of(&partial.source_tag));
        records.push(fold_group(character, &group));
    }

    debug!(
        partial_count,
        record_count = records.len(),
        "merge complete"
    );
    MergeOutcome {
        records,
        partial_count,
    }
}

fn priority_of(tag: &str) -> u8 {
    // Unknown tags sort after every declared source.
    SourceKind::from_tag(tag).map_or(u8::MAX, SourceKind::priority)
}

fn fold_group(character: char, group: &[PartialRecord]) -> MasterRecord {
    let mut record = MasterRecord::new(character);

    let mut on: BTreeSet<String> = BTreeSet::new();
    let mut kun: BTreeSet<String> = BTreeSet::new();
    let mut radicals: BTreeSet<String> = BTreeSet::new();
    let mut confused: BTreeSet<String> = BTreeSet::new();
    let mut examples: BTreeSet<String> = BTreeSet::new();

    for partial in group {
        // Scalar fields: first non-null wins; later sources never overwrite.
        if record.meaning.is_none() {
            record.meaning = partial.meaning.clone();
        }
        if record.grade.is_none() {
            record.grade = partial.grade;
        }
        if record.strokes.is_none() {
            record.strokes = partial.stroke_count;
        }
        if record.jlpt.is_none() {
            record.jlpt = partial.jlpt_level.clone();
        }
        if record.difficulty.is_none() {
            record.difficulty = partial.difficulty;
        }

        // List fields: set union regardless of priority.
        on.extend(partial.on_readings.iter().cloned());
        kun.extend(partial.kun_readings.iter().cloned());
        radicals.extend(partial.radicals.iter().cloned());
        confused.extend(partial.confused_with.iter().cloned());
        examples.extend(partial.examples.iter().cloned());
        record.category.extend(partial.categories.iter().cloned());
        record.sources.insert(partial.source_tag.clone());
    }

    record.on = on.into_iter().collect();
    record.kun = kun.into_iter().collect();
    record.radicals = radicals.into_iter().collect();
    record.confused_with = confused.into_iter().collect();
    record.examples = examples.into_iter().collect();
    record.radical = record
        .radicals
        .first()
        .map(|name| RadicalInfo::from_name(name.clone()));
    record
}
