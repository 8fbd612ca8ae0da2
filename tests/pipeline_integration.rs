//! Integration tests for the tree export -> wind hierarchy pipeline

use std::fs;
use std::path::PathBuf;

use wind_hierarchy::core::types::{BoneId, GroupIndex, Level};
use wind_hierarchy::core::HierarchyConfig;
use wind_hierarchy::pipeline::{default_output_path, run_batch, run_document, PipelineOutcome};
use wind_hierarchy::WindHierarchyDocument;

/// Worked example: 11 is shared by trunk and branch, 20 by branch and twig
const WORKED_TREE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SpeedTreeRaw>
    <Objects>
        <Object Name="Trunk_L1">
            <Vertices>
                <Points>0 0 0 1 1 1</Points>
                <BoneID>10 10 11</BoneID>
            </Vertices>
        </Object>
        <Object Name="Branch_L2">
            <Vertices>
                <BoneID>11 20 20</BoneID>
            </Vertices>
        </Object>
        <Object Name="Twig_L3">
            <Vertices>
                <BoneID>20 30 -1</BoneID>
            </Vertices>
        </Object>
        <Object Name="Leaves">
            <Vertices>
                <BoneID>99</BoneID>
            </Vertices>
        </Object>
    </Objects>
</SpeedTreeRaw>"#;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wind_hierarchy_it_{}_{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_worked_example_end_to_end() {
    let run = run_document(WORKED_TREE, &HierarchyConfig::default());

    let assignment = &run.classification.assignment;
    assert_eq!(assignment.len(), 4);
    assert_eq!(assignment[&BoneId(10)], Level(1));
    assert_eq!(assignment[&BoneId(11)], Level(1));
    assert_eq!(assignment[&BoneId(20)], Level(2));
    assert_eq!(assignment[&BoneId(30)], Level(3));
    assert!(!assignment.contains_key(&BoneId(99)));

    let doc = run.outcome.document().expect("hierarchy generated");
    let names: Vec<&str> = doc.joints.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Root",
            "Bone_10_Start",
            "Bone_10_End",
            "Bone_11_Start",
            "Bone_11_End",
            "Bone_20_Start",
            "Bone_20_End",
            "Bone_30_Start",
            "Bone_30_End",
        ]
    );
    assert_eq!(doc.joints[5].simulation_group_index, GroupIndex(1));
    assert_eq!(doc.joints[7].simulation_group_index, GroupIndex(2));

    let groups = &doc.simulation_groups;
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].influence, Some(1.0));
    assert_eq!(
        (groups[1].min_influence, groups[1].max_influence, groups[1].shift_top),
        (Some(0.2), Some(0.6), Some(0.3))
    );
    assert_eq!(
        (groups[2].min_influence, groups[2].max_influence, groups[2].shift_top),
        (Some(0.4), Some(0.8), Some(0.2))
    );
}

#[test]
fn test_json_document_shape() {
    let run = run_document(WORKED_TREE, &HierarchyConfig::default());
    let json = run.outcome.document().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["bIsGroundCover"], serde_json::json!(false));
    assert_eq!(value["GustAttenuation"], serde_json::json!(0.25));
    assert_eq!(value["Joints"].as_array().unwrap().len(), 9);
    assert_eq!(value["SimulationGroups"][0]["bIsTrunkGroup"], serde_json::json!(true));
    assert!(value["SimulationGroups"][0].get("MinInfluence").is_none());
    assert!(value["SimulationGroups"][1].get("Influence").is_none());

    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(keys.contains(&"Joints"));
    assert!(keys.contains(&"SimulationGroups"));
    assert!(json.find("\"Joints\"").unwrap() < json.find("\"GustAttenuation\"").unwrap());
}

#[test]
fn test_empty_and_broken_inputs_generate_nothing() {
    let config = HierarchyConfig::default();
    let inputs = [
        "<SpeedTreeRaw/>",
        "<SpeedTreeRaw><Objects/></SpeedTreeRaw>",
        "<SpeedTreeRaw><Objects><Object Name=\"Leaves\"><Vertices><BoneID>1</BoneID></Vertices></Object></Objects></SpeedTreeRaw>",
        "<SpeedTreeRaw><Objects>",
        "",
    ];
    for xml in inputs {
        let run = run_document(xml, &config);
        assert_eq!(run.outcome, PipelineOutcome::NothingGenerated, "input {:?}", xml);
    }
}

#[test]
fn test_batch_writes_documents() {
    let dir = temp_dir("batch");
    let good = dir.join("oak.xml");
    let empty = dir.join("bush.xml");
    let missing = dir.join("missing.xml");
    fs::write(&good, WORKED_TREE).unwrap();
    fs::write(&empty, "<SpeedTreeRaw><Objects/></SpeedTreeRaw>").unwrap();

    let paths = vec![good.clone(), empty.clone(), missing.clone()];
    let results = run_batch(&paths, &HierarchyConfig::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].path, good);
    assert_eq!(results[2].path, missing);
    assert!(results[0].run.outcome.document().is_some());
    assert_eq!(results[1].run.outcome, PipelineOutcome::NothingGenerated);
    assert_eq!(results[2].run.outcome, PipelineOutcome::NothingGenerated);

    let output = default_output_path(&good, None);
    let doc = results[0].run.outcome.document().unwrap();
    doc.write_to(&output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, doc.to_json().unwrap());
    assert_eq!(WindHierarchyDocument::from_json(&written).unwrap(), *doc);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_config_file_changes_policy() {
    let config = HierarchyConfig::from_toml_str(
        r#"
        root_joint_name = "TreeRoot"
        gust_attenuation = 0.4
        is_ground_cover = true
        "#,
    )
    .unwrap();

    let run = run_document(WORKED_TREE, &config);
    let doc = run.outcome.document().unwrap();
    assert_eq!(doc.joints[0].name, "TreeRoot");
    assert_eq!(doc.gust_attenuation, 0.4);
    assert!(doc.is_ground_cover);
    assert_eq!(doc.simulation_groups[1].min_influence, Some(0.2));
}
