//! Extract -> classify -> emit pipeline
//!
//! Every stage is a pure function over its input, so independent documents
//! are processed in parallel by `run_batch` without any shared state.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classify::{classify, Classification};
use crate::core::config::HierarchyConfig;
use crate::core::error::WindError;
use crate::core::types::{Level, LevelIndex};
use crate::emit::{generate_hierarchy, WindHierarchyDocument};
use crate::extract::{limit_levels, load_level_index, read_source_file};

/// Result of running the pipeline on one source
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Generated(WindHierarchyDocument),
    /// No bone could be assigned a level; there is no hierarchy to write
    NothingGenerated,
}

impl PipelineOutcome {
    pub fn document(&self) -> Option<&WindHierarchyDocument> {
        match self {
            PipelineOutcome::Generated(doc) => Some(doc),
            PipelineOutcome::NothingGenerated => None,
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub index: LevelIndex,
    pub classification: Classification,
    pub outcome: PipelineOutcome,
}

/// Classify and emit an already extracted level index
pub fn run_index(index: LevelIndex, config: &HierarchyConfig) -> PipelineRun {
    let index = limit_levels(index, Level(config.max_level));
    let classification = classify(&index);

    let outcome = match generate_hierarchy(&classification.assignment, config) {
        Ok(doc) => PipelineOutcome::Generated(doc),
        Err(WindError::NoAssignableBones) => PipelineOutcome::NothingGenerated,
        Err(e) => {
            tracing::warn!("Hierarchy generation failed: {}", e);
            PipelineOutcome::NothingGenerated
        }
    };

    PipelineRun {
        index,
        classification,
        outcome,
    }
}

/// Run the pipeline on tree export text
pub fn run_document(xml: &str, config: &HierarchyConfig) -> PipelineRun {
    run_index(load_level_index(xml), config)
}

/// Run the pipeline on a tree export file
pub fn run_file(path: &Path, config: &HierarchyConfig) -> PipelineRun {
    tracing::info!("Processing {:?}", path);
    run_index(read_source_file(path), config)
}

/// One source of a batch run
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub path: PathBuf,
    pub run: PipelineRun,
}

/// Run the pipeline over many files in parallel, results in input order
pub fn run_batch(paths: &[PathBuf], config: &HierarchyConfig) -> Vec<BatchItem> {
    paths
        .par_iter()
        .map(|path| BatchItem {
            path: path.clone(),
            run: run_file(path, config),
        })
        .collect()
}

/// Default output location: `<stem>_wind_hierarchy.json` in `dir`, or next to the input
pub fn default_output_path(input: &Path, dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tree".to_string());
    let file_name = format!("{}_wind_hierarchy.json", stem);

    match dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
