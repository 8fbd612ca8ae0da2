//! Short textual preview of the hierarchy a bone assignment would produce

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::config::HierarchyConfig;
use crate::core::types::{BoneLevelAssignment, Level};
use crate::emit::joints::{end_joint_name, start_joint_name};

const SAMPLE_BONES: usize = 3;

pub fn preview(assignment: &BoneLevelAssignment, config: &HierarchyConfig) -> String {
    if assignment.is_empty() {
        return "No bone assignments to preview\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Sample Joints:");
    for (&bone_id, level) in assignment.iter().take(SAMPLE_BONES) {
        let group = level.group_index();
        for name in [
            start_joint_name(&config.joint_prefix, bone_id),
            end_joint_name(&config.joint_prefix, bone_id),
        ] {
            let _ = writeln!(
                out,
                "  {{ \"JointName\": \"{}\", \"SimulationGroupIndex\": {} }}",
                name, group
            );
        }
    }
    if assignment.len() > SAMPLE_BONES {
        let _ = writeln!(
            out,
            "  ... and {} more bone joints",
            (assignment.len() - SAMPLE_BONES) * 2
        );
    }

    let levels: BTreeSet<Level> = assignment.values().copied().collect();
    let _ = writeln!(out, "Simulation Groups ({}):", levels.len());
    for level in levels {
        let kind = if level.is_trunk() { "Trunk" } else { "Branch" };
        let _ = writeln!(out, "  Group {}: Level {} ({})", level.group_index(), level, kind);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BoneId;

    #[test]
    fn test_empty_preview() {
        let text = preview(&BoneLevelAssignment::new(), &HierarchyConfig::default());
        assert_eq!(text, "No bone assignments to preview\n");
    }

    #[test]
    fn test_preview_samples_and_levels() {
        let assignment: BoneLevelAssignment = [
            (BoneId(10), Level(1)),
            (BoneId(11), Level(1)),
            (BoneId(20), Level(2)),
            (BoneId(30), Level(4)),
        ]
        .into_iter()
        .collect();

        let text = preview(&assignment, &HierarchyConfig::default());
        assert!(text.contains(r#"{ "JointName": "Bone_10_Start", "SimulationGroupIndex": 0 }"#));
        assert!(text.contains(r#"{ "JointName": "Bone_20_End", "SimulationGroupIndex": 1 }"#));
        assert!(!text.contains("Bone_30_Start"));
        assert!(text.contains("... and 2 more bone joints"));
        assert!(text.contains("Simulation Groups (3):"));
        assert!(text.contains("  Group 3: Level 4 (Branch)"));
        assert!(text.contains("  Group 0: Level 1 (Trunk)"));
    }
}
