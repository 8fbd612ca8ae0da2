//! Wind Hierarchy Emission
//!
//! Builds the joint list and simulation group table for a bone level
//! assignment and wraps them in the configuration document consumed by
//! the wind simulation.

pub mod document;
pub mod groups;
pub mod joints;
pub mod preview;

use std::collections::BTreeSet;

use crate::core::config::HierarchyConfig;
use crate::core::error::{Result, WindError};
use crate::core::types::{BoneLevelAssignment, Level};

pub use document::WindHierarchyDocument;
pub use groups::{build_simulation_groups, SimulationGroup};
pub use joints::{build_joints, Joint};
pub use preview::preview;

/// Generate the wind hierarchy for a bone level assignment.
///
/// # Errors
///
/// Returns `NoAssignableBones` when the assignment is empty; there is no
/// degenerate document for an empty tree. Returns `LevelTooDeep` when a
/// bone sits deeper than `config.max_level`.
pub fn generate_hierarchy(
    assignment: &BoneLevelAssignment,
    config: &HierarchyConfig,
) -> Result<WindHierarchyDocument> {
    let levels: BTreeSet<Level> = assignment.values().copied().collect();
    let Some(&max_level) = levels.last() else {
        tracing::info!("No bone assignments provided");
        return Err(WindError::NoAssignableBones);
    };

    if max_level.0 > config.max_level {
        tracing::warn!(
            "Level {} exceeds max level {}, not generating",
            max_level,
            config.max_level
        );
        return Err(WindError::LevelTooDeep {
            level: max_level.0,
            max_level: config.max_level,
        });
    }

    tracing::info!(
        "Found levels: {:?}, Max level: {}",
        levels.iter().map(|l| l.0).collect::<Vec<_>>(),
        max_level
    );

    let document = WindHierarchyDocument {
        joints: build_joints(assignment, config),
        simulation_groups: build_simulation_groups(max_level, config),
        is_ground_cover: config.is_ground_cover,
        gust_attenuation: config.gust_attenuation,
    };

    tracing::info!(
        "Total joints: {}, total simulation groups: {}",
        document.joints.len(),
        document.simulation_groups.len()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BoneId, GroupIndex};

    fn worked_assignment() -> BoneLevelAssignment {
        [
            (BoneId(10), Level(1)),
            (BoneId(11), Level(1)),
            (BoneId(20), Level(2)),
            (BoneId(30), Level(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_assignment_generates_nothing() {
        let result = generate_hierarchy(&BoneLevelAssignment::new(), &HierarchyConfig::default());
        assert!(matches!(result, Err(WindError::NoAssignableBones)));
    }

    #[test]
    fn test_level_beyond_max_is_refused() {
        let assignment: BoneLevelAssignment =
            [(BoneId(1), Level(1)), (BoneId(2), Level(u32::MAX))].into_iter().collect();
        let result = generate_hierarchy(&assignment, &HierarchyConfig::default());
        assert!(matches!(
            result,
            Err(WindError::LevelTooDeep { level: u32::MAX, max_level: 64 })
        ));
    }

    #[test]
    fn test_level_at_max_is_generated() {
        let assignment: BoneLevelAssignment = [(BoneId(1), Level(64))].into_iter().collect();
        let doc = generate_hierarchy(&assignment, &HierarchyConfig::default()).unwrap();
        assert_eq!(doc.simulation_groups.len(), 64);
    }

    #[test]
    fn test_worked_example_document() {
        let doc = generate_hierarchy(&worked_assignment(), &HierarchyConfig::default()).unwrap();

        assert_eq!(doc.joints.len(), 9);
        assert_eq!(doc.simulation_groups.len(), 3);
        assert!(!doc.is_ground_cover);
        assert_eq!(doc.gust_attenuation, 0.25);

        assert_eq!(doc.simulation_groups[1].min_influence, Some(0.2));
        assert_eq!(doc.simulation_groups[1].max_influence, Some(0.6));
        assert_eq!(doc.simulation_groups[1].shift_top, Some(0.3));
        assert_eq!(doc.simulation_groups[2].min_influence, Some(0.4));
        assert_eq!(doc.simulation_groups[2].max_influence, Some(0.8));
        assert_eq!(doc.simulation_groups[2].shift_top, Some(0.2));
    }

    #[test]
    fn test_gap_levels_still_get_groups() {
        let assignment: BoneLevelAssignment =
            [(BoneId(1), Level(1)), (BoneId(2), Level(4))].into_iter().collect();
        let doc = generate_hierarchy(&assignment, &HierarchyConfig::default()).unwrap();

        assert_eq!(doc.simulation_groups.len(), 4);
        assert_eq!(doc.bones_in_group(GroupIndex(1)), 0);
        assert_eq!(doc.bones_in_group(GroupIndex(3)), 1);
    }

    #[test]
    fn test_branch_only_tree_keeps_trunk_group() {
        let assignment: BoneLevelAssignment = [(BoneId(7), Level(2))].into_iter().collect();
        let doc = generate_hierarchy(&assignment, &HierarchyConfig::default()).unwrap();

        assert_eq!(doc.simulation_groups.len(), 2);
        assert!(doc.simulation_groups[0].is_trunk);
        assert_eq!(doc.bones_in_group(GroupIndex(0)), 0);
    }

    #[test]
    fn test_pretty_json_layout() {
        let assignment: BoneLevelAssignment = [(BoneId(4), Level(2))].into_iter().collect();
        let doc = generate_hierarchy(&assignment, &HierarchyConfig::default()).unwrap();

        let expected = r#"{
  "Joints": [
    {
      "JointName": "Root",
      "SimulationGroupIndex": 0
    },
    {
      "JointName": "Bone_4_Start",
      "SimulationGroupIndex": 1
    },
    {
      "JointName": "Bone_4_End",
      "SimulationGroupIndex": 1
    }
  ],
  "SimulationGroups": [
    {
      "bUseDualInfluence": false,
      "Influence": 1.0,
      "bIsTrunkGroup": true
    },
    {
      "bUseDualInfluence": true,
      "MinInfluence": 0.2,
      "MaxInfluence": 0.6,
      "ShiftTop": 0.3,
      "bIsTrunkGroup": false
    }
  ],
  "bIsGroundCover": false,
  "GustAttenuation": 0.25
}"#;
        assert_eq!(doc.to_json().unwrap(), expected);
    }

    #[test]
    fn test_json_reads_back() {
        let doc = generate_hierarchy(&worked_assignment(), &HierarchyConfig::default()).unwrap();
        let parsed = WindHierarchyDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_summary_counts_bones_per_group() {
        let doc = generate_hierarchy(&worked_assignment(), &HierarchyConfig::default()).unwrap();
        let summary = doc.summary();

        assert!(summary.contains("Total joints: 9"));
        assert!(summary.contains("Total simulation groups: 3"));
        assert!(summary.contains("  Group 0 (Trunk): 2 bones"));
        assert!(summary.contains("  Group 1 (Branch): 1 bones"));
        assert!(summary.contains("  Group 2 (Branch): 1 bones"));
    }

    #[test]
    fn test_config_document_constants() {
        let config = HierarchyConfig {
            is_ground_cover: true,
            gust_attenuation: 0.5,
            ..HierarchyConfig::default()
        };
        let doc = generate_hierarchy(&worked_assignment(), &config).unwrap();
        assert!(doc.is_ground_cover);
        assert_eq!(doc.gust_attenuation, 0.5);
    }
}
