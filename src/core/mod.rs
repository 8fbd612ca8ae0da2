pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchyConfig;
pub use error::{Result, WindError};
pub use types::{BoneId, BoneLevelAssignment, GroupIndex, Level, LevelIndex, ObjectRecord};
