//! Reading tree exports from disk
//!
//! A missing, unreadable or malformed source is not a fault: the
//! recovering readers log it and hand back an empty index, which the rest
//! of the pipeline treats as "nothing to generate".

use std::fs;
use std::path::Path;

use crate::core::error::{Result, WindError};
use crate::core::types::LevelIndex;
use crate::extract::parse_level_index;

/// Read and parse a tree export, surfacing source errors
pub fn try_read_source_file(path: &Path) -> Result<LevelIndex> {
    let xml = fs::read_to_string(path).map_err(|source| WindError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_level_index(&xml)
}

/// Read and parse a tree export, recovering source errors as an empty index
pub fn read_source_file(path: &Path) -> LevelIndex {
    match try_read_source_file(path) {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!("Could not load {:?}: {}", path, e);
            LevelIndex::new()
        }
    }
}

/// Parse tree export text, recovering a malformed document as an empty index
pub fn load_level_index(xml: &str) -> LevelIndex {
    parse_level_index(xml).unwrap_or_else(|e| {
        tracing::warn!("XML parsing error: {}", e);
        LevelIndex::new()
    })
}
