//! Simulation group parameters
//!
//! Group 0 is the rigid trunk with a single influence value. Every deeper
//! group uses dual influence whose range rises, and whose top shift falls,
//! with depth.

use serde::{Deserialize, Serialize};

use crate::core::config::HierarchyConfig;
use crate::core::types::{GroupIndex, Level};

/// Wind response parameters shared by all joints in a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationGroup {
    #[serde(rename = "bUseDualInfluence")]
    pub use_dual_influence: bool,
    #[serde(rename = "Influence", default, skip_serializing_if = "Option::is_none")]
    pub influence: Option<f64>,
    #[serde(rename = "MinInfluence", default, skip_serializing_if = "Option::is_none")]
    pub min_influence: Option<f64>,
    #[serde(rename = "MaxInfluence", default, skip_serializing_if = "Option::is_none")]
    pub max_influence: Option<f64>,
    #[serde(rename = "ShiftTop", default, skip_serializing_if = "Option::is_none")]
    pub shift_top: Option<f64>,
    #[serde(rename = "bIsTrunkGroup")]
    pub is_trunk: bool,
}

impl SimulationGroup {
    /// The trunk group (index 0)
    pub fn trunk(config: &HierarchyConfig) -> Self {
        Self {
            use_dual_influence: false,
            influence: Some(round2(config.trunk_influence)),
            min_influence: None,
            max_influence: None,
            shift_top: None,
            is_trunk: true,
        }
    }

    /// A branch group; `group` must be 1 or greater
    pub fn branch(group: GroupIndex, config: &HierarchyConfig) -> Self {
        debug_assert!(!group.is_trunk(), "group 0 is always the trunk");
        let depth = f64::from(group.0.saturating_sub(1));

        let raw_min = config.base_min_influence + depth * config.min_influence_step;
        let min_influence = raw_min.min(config.max_influence_cap);
        let max_influence = (raw_min + config.influence_span).min(config.max_influence_cap);
        let shift_top = (config.base_shift_top - depth * config.shift_top_step).max(0.0);

        Self {
            use_dual_influence: true,
            influence: None,
            min_influence: Some(round2(min_influence)),
            max_influence: Some(round2(max_influence)),
            shift_top: Some(round2(shift_top)),
            is_trunk: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        if self.is_trunk {
            "Trunk"
        } else {
            "Branch"
        }
    }
}

/// Contiguous group table covering every group up to `max_level`
///
/// Gap levels with no bones still get an entry so that group indices stay
/// dense for index-based lookup.
pub fn build_simulation_groups(max_level: Level, config: &HierarchyConfig) -> Vec<SimulationGroup> {
    let last = max_level.group_index().0;
    let mut groups = Vec::with_capacity(last as usize + 1);

    groups.push(SimulationGroup::trunk(config));
    for g in 1..=last {
        groups.push(SimulationGroup::branch(GroupIndex(g), config));
    }

    groups
}

/// Round to two decimal places
///
/// Rounds the exact decimal value of `value`, ties to even, so `0.125`
/// becomes `0.12` and `1.005` (stored just below) becomes `1.0`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
