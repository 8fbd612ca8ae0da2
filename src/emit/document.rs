//! Wind hierarchy document and serialization

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::GroupIndex;
use crate::emit::groups::SimulationGroup;
use crate::emit::joints::Joint;

/// Complete wind hierarchy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindHierarchyDocument {
    #[serde(rename = "Joints")]
    pub joints: Vec<Joint>,
    #[serde(rename = "SimulationGroups")]
    pub simulation_groups: Vec<SimulationGroup>,
    #[serde(rename = "bIsGroundCover")]
    pub is_ground_cover: bool,
    #[serde(rename = "GustAttenuation")]
    pub gust_attenuation: f64,
}

impl WindHierarchyDocument {
    /// Pretty-printed JSON with keys in construction order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("Wind hierarchy JSON saved to: {:?}", path);
        Ok(())
    }

    /// Number of bones (start joints) bound to a group
    pub fn bones_in_group(&self, group: GroupIndex) -> usize {
        self.joints
            .iter()
            .filter(|j| j.simulation_group_index == group && j.is_bone_start())
            .count()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total joints: {}", self.joints.len());
        let _ = writeln!(out, "Total simulation groups: {}", self.simulation_groups.len());
        let _ = writeln!(out, "Summary:");
        for (i, group) in self.simulation_groups.iter().enumerate() {
            let _ = writeln!(
                out,
                "  Group {} ({}): {} bones",
                i,
                group.kind(),
                self.bones_in_group(GroupIndex(i as u32))
            );
        }
        out
    }
}
