//! Joint list construction

use serde::{Deserialize, Serialize};

use crate::core::config::HierarchyConfig;
use crate::core::types::{BoneId, BoneLevelAssignment, GroupIndex};

/// A named joint bound to a simulation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joint {
    #[serde(rename = "JointName")]
    pub name: String,
    #[serde(rename = "SimulationGroupIndex")]
    pub simulation_group_index: GroupIndex,
}

impl Joint {
    pub fn new(name: impl Into<String>, simulation_group_index: GroupIndex) -> Self {
        Self {
            name: name.into(),
            simulation_group_index,
        }
    }

    /// Start joints mark one bone each
    pub fn is_bone_start(&self) -> bool {
        self.name.ends_with("_Start")
    }
}

pub fn start_joint_name(prefix: &str, bone_id: BoneId) -> String {
    format!("{}_{}_Start", prefix, bone_id)
}

pub fn end_joint_name(prefix: &str, bone_id: BoneId) -> String {
    format!("{}_{}_End", prefix, bone_id)
}

/// Root joint followed by a start/end pair per bone in ascending id order
pub fn build_joints(assignment: &BoneLevelAssignment, config: &HierarchyConfig) -> Vec<Joint> {
    let mut joints = Vec::with_capacity(1 + 2 * assignment.len());
    joints.push(Joint::new(config.root_joint_name.clone(), GroupIndex::TRUNK));

    for (&bone_id, level) in assignment {
        let group = level.group_index();
        joints.push(Joint::new(start_joint_name(&config.joint_prefix, bone_id), group));
        joints.push(Joint::new(end_joint_name(&config.joint_prefix, bone_id), group));
    }

    joints
}
