use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindError {
    #[error("Source unavailable: {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed source document: {0}")]
    MalformedSource(String),

    #[error("No assignable bones: nothing to generate")]
    NoAssignableBones,

    #[error("Level {level} exceeds the deepest supported level {max_level}")]
    LevelTooDeep { level: u32, max_level: u32 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl WindError {
    /// Errors that the pipeline recovers from by treating the input as empty
    pub fn is_recoverable_source_error(&self) -> bool {
        matches!(
            self,
            WindError::SourceUnavailable { .. } | WindError::MalformedSource(_)
        )
    }
}

impl From<quick_xml::Error> for WindError {
    fn from(e: quick_xml::Error) -> Self {
        WindError::MalformedSource(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WindError>;
