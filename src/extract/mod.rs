//! Tree Export Extraction
//!
//! Turns a tree export document into a `LevelIndex`: every object whose
//! name carries a `_L<n>` marker, grouped by that level, with the bone ids
//! its vertices reference. Objects without a marker contribute nothing.

pub mod bones;
pub mod level;
pub mod parser;
pub mod source;

use std::fmt::Write;

use crate::core::error::Result;
use crate::core::types::{Level, LevelIndex, ObjectRecord};

pub use bones::{count_bone_ids, parse_bone_token};
pub use level::parse_level;
pub use parser::{parse_source_objects, SourceObject};
pub use source::{load_level_index, read_source_file, try_read_source_file};

/// Parse a tree export document into a level index
pub fn parse_level_index(xml: &str) -> Result<LevelIndex> {
    let objects = parse_source_objects(xml)?;
    Ok(build_level_index(objects))
}

/// Group parsed objects by the level in their names
pub fn build_level_index(objects: impl IntoIterator<Item = SourceObject>) -> LevelIndex {
    let mut index = LevelIndex::new();

    for object in objects {
        let Some(level) = parse_level(&object.name) else {
            tracing::debug!("Skipping object {:?}: no level marker", object.name);
            continue;
        };

        let bone_counts = object
            .bone_ids
            .as_deref()
            .map(count_bone_ids)
            .unwrap_or_default();

        tracing::debug!(
            "Found object {:?} at level {} with {} distinct bones",
            object.name,
            level,
            bone_counts.len()
        );

        index
            .entry(level)
            .or_default()
            .push(ObjectRecord::new(object.name, bone_counts));
    }

    index
}

/// Drop objects marked deeper than `max_level`
pub fn limit_levels(mut index: LevelIndex, max_level: Level) -> LevelIndex {
    let too_deep = index.split_off(&Level(max_level.0.saturating_add(1)));
    for (level, objects) in &too_deep {
        for object in objects {
            tracing::warn!(
                "Excluding object {:?}: level {} exceeds max level {}",
                object.name,
                level,
                max_level
            );
        }
    }
    index
}

/// Human-readable listing of objects per level
pub fn describe_index(index: &LevelIndex) -> String {
    let mut out = String::new();
    for (level, objects) in index {
        let _ = writeln!(out, "Level {}:", level);
        for object in objects {
            let bones: Vec<String> = object
                .bone_counts
                .iter()
                .map(|(id, count)| format!("{}x{}", id, count))
                .collect();
            let _ = writeln!(out, "  {} [{}]", object.name, bones.join(", "));
        }
    }
    out
}
