//! Core type definitions used throughout the codebase

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Bone identifier referenced by mesh vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoneId(pub u32);

impl fmt::Display for BoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Branching tier of a tree object (1 = trunk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u32);

impl Level {
    pub const TRUNK: Level = Level(1);

    /// Simulation group driving bones at this level (`max(0, level - 1)`)
    pub fn group_index(self) -> GroupIndex {
        GroupIndex(self.0.saturating_sub(1))
    }

    pub fn is_trunk(self) -> bool {
        self.group_index().is_trunk()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index into the simulation group table
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupIndex(pub u32);

impl GroupIndex {
    pub const TRUNK: GroupIndex = GroupIndex(0);

    pub fn is_trunk(self) -> bool {
        self == Self::TRUNK
    }
}

impl fmt::Display for GroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named object from the source document with its bone usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub name: String,
    /// Vertices referencing each bone. Presence matters downstream, counts are informational.
    pub bone_counts: BTreeMap<BoneId, u32>,
}

impl ObjectRecord {
    pub fn new(name: impl Into<String>, bone_counts: BTreeMap<BoneId, u32>) -> Self {
        Self {
            name: name.into(),
            bone_counts,
        }
    }

    /// Record with no vertex data
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, BTreeMap::new())
    }

    /// Distinct bone ids in ascending order
    pub fn bone_ids(&self) -> impl Iterator<Item = BoneId> + '_ {
        self.bone_counts.keys().copied()
    }

    /// Total bone references across all vertices
    pub fn vertex_count(&self) -> u64 {
        self.bone_counts.values().map(|&c| u64::from(c)).sum()
    }
}

/// Objects grouped by the level parsed from their names
pub type LevelIndex = BTreeMap<Level, Vec<ObjectRecord>>;

/// Authoritative level of every observed bone
pub type BoneLevelAssignment = BTreeMap<BoneId, Level>;
