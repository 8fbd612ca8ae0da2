//! Bone Level Classification
//!
//! A bone can be skinned by objects at several branch levels, e.g. the
//! bone where a branch meets the trunk. Each bone is governed by the most
//! trunk-ward level it appears in, so it is never counted again in a more
//! flexible branch group.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{BoneId, BoneLevelAssignment, Level, LevelIndex};

/// Distinct bones referenced by any object at each level
pub fn level_bone_sets(index: &LevelIndex) -> BTreeMap<Level, AHashSet<BoneId>> {
    index
        .iter()
        .map(|(&level, objects)| {
            let bones: AHashSet<BoneId> = objects.iter().flat_map(|o| o.bone_ids()).collect();
            (level, bones)
        })
        .collect()
}

/// Assign every observed bone to the lowest level it appears in
pub fn assign_bone_levels(index: &LevelIndex) -> BoneLevelAssignment {
    let mut assignment = BoneLevelAssignment::new();

    for (&level, objects) in index {
        for bone_id in objects.iter().flat_map(|o| o.bone_ids()) {
            assignment
                .entry(bone_id)
                .and_modify(|assigned: &mut Level| *assigned = (*assigned).min(level))
                .or_insert(level);
        }
    }

    assignment
}

/// Per-level outcome of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelReport {
    pub level: Level,
    /// Distinct bones referenced at this level
    pub distinct_bones: usize,
    /// Bones whose authoritative level is this one
    pub retained: usize,
    /// Bones claimed by a lower level instead
    pub discarded: usize,
}

/// Assignment plus a per-level account of where each bone ended up
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub assignment: BoneLevelAssignment,
    /// One entry per level in the index, highest level first
    pub levels: Vec<LevelReport>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn total_discarded(&self) -> usize {
        self.levels.iter().map(|r| r.discarded).sum()
    }
}

/// Classify bones and report retained/discarded bones per level
pub fn classify(index: &LevelIndex) -> Classification {
    let sets = level_bone_sets(index);
    let assignment = assign_bone_levels(index);

    tracing::debug!(
        "Processing levels in order: {:?}",
        sets.keys().rev().map(|l| l.0).collect::<Vec<_>>()
    );

    let levels = sets
        .iter()
        .rev()
        .map(|(&level, bones)| {
            let mut sorted: Vec<BoneId> = bones.iter().copied().collect();
            sorted.sort_unstable();
            tracing::debug!("Level {} has bone IDs: {:?}", level, sorted);

            let mut retained = 0;
            for bone_id in &sorted {
                match assignment.get(bone_id) {
                    Some(&assigned) if assigned == level => {
                        retained += 1;
                        tracing::debug!("Bone ID {} assigned to level {}", bone_id, level);
                    }
                    Some(&assigned) => {
                        tracing::debug!(
                            "Bone ID {} discarded from level {} (belongs to level {})",
                            bone_id,
                            level,
                            assigned
                        );
                    }
                    None => {}
                }
            }

            LevelReport {
                level,
                distinct_bones: sorted.len(),
                retained,
                discarded: sorted.len() - retained,
            }
        })
        .collect();

    Classification { assignment, levels }
}
