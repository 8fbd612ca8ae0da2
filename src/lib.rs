//! Wind Hierarchy - tree export to wind simulation configuration
//!
//! Classifies the bones of a tree export into branch levels and emits the
//! joint list and per-level simulation groups a wind system consumes.

pub mod classify;
pub mod core;
pub mod emit;
pub mod extract;
pub mod pipeline;

pub use crate::core::{HierarchyConfig, Result, WindError};
pub use classify::{assign_bone_levels, classify, Classification};
pub use emit::{generate_hierarchy, WindHierarchyDocument};
pub use extract::{parse_level_index, read_source_file};
pub use pipeline::{run_batch, run_document, run_file, PipelineOutcome, PipelineRun};
