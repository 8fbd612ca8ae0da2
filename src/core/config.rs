//! Hierarchy generation config with documented constants
//!
//! Every policy number used by the emitter lives here. The defaults
//! reproduce the stock wind setup; a TOML file can override any subset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WindError};

/// Upper bound accepted for `max_level`
pub const MAX_LEVEL_LIMIT: u32 = 4096;

/// Parameters for turning a bone level assignment into a wind hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    // === JOINT NAMING ===
    /// Name of the single root joint that heads the joint list
    pub root_joint_name: String,

    /// Prefix for per-bone joints (`<prefix>_<id>_Start`, `<prefix>_<id>_End`)
    pub joint_prefix: String,

    // === LEVELS ===
    /// Deepest branch level accepted from a tree export
    ///
    /// The group table is contiguous up to the deepest level, so this bounds
    /// its size. Objects marked deeper than this are excluded.
    pub max_level: u32,

    // === TRUNK GROUP ===
    /// Influence of the trunk group (group 0)
    ///
    /// The trunk never uses dual influence, so this single value is all
    /// that is emitted for it.
    pub trunk_influence: f64,

    // === BRANCH GROUPS ===
    /// Minimum influence of the first branch group (group 1)
    pub base_min_influence: f64,

    /// Added to the minimum influence for each group beyond the first
    ///
    /// At 0.2, group 1 starts at 0.2, group 2 at 0.4, group 3 at 0.6.
    pub min_influence_step: f64,

    /// Distance between a group's minimum and maximum influence
    pub influence_span: f64,

    /// Ceiling for both minimum and maximum influence
    pub max_influence_cap: f64,

    /// Shift-top value of the first branch group
    pub base_shift_top: f64,

    /// Removed from shift-top for each group beyond the first (floored at 0)
    pub shift_top_step: f64,

    // === DOCUMENT ===
    pub is_ground_cover: bool,

    /// Fraction of gust strength absorbed by the hierarchy
    pub gust_attenuation: f64,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            root_joint_name: "Root".to_string(),
            joint_prefix: "Bone".to_string(),

            max_level: 64,

            trunk_influence: 1.0,

            // group g: min = 0.2 + (g-1)*0.2, max = min + 0.4, shift = 0.3 - (g-1)*0.1
            base_min_influence: 0.2,
            min_influence_step: 0.2,
            influence_span: 0.4,
            max_influence_cap: 1.0,
            base_shift_top: 0.3,
            shift_top_step: 0.1,

            is_ground_cover: false,
            gust_attenuation: 0.25,
        }
    }
}

impl HierarchyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: HierarchyConfig = toml::from_str(contents)
            .map_err(|e| WindError::Config(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WindError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.root_joint_name.trim().is_empty() || self.joint_prefix.trim().is_empty() {
            return Err(WindError::Config("Joint names must not be empty".into()));
        }

        if !(1..=MAX_LEVEL_LIMIT).contains(&self.max_level) {
            return Err(WindError::Config(format!(
                "max_level ({}) must be within [1, {}]",
                self.max_level, MAX_LEVEL_LIMIT
            )));
        }

        let unit_fields = [
            ("trunk_influence", self.trunk_influence),
            ("base_min_influence", self.base_min_influence),
            ("max_influence_cap", self.max_influence_cap),
            ("base_shift_top", self.base_shift_top),
            ("gust_attenuation", self.gust_attenuation),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(WindError::Config(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        let step_fields = [
            ("min_influence_step", self.min_influence_step),
            ("influence_span", self.influence_span),
            ("shift_top_step", self.shift_top_step),
        ];
        for (name, value) in step_fields {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(WindError::Config(format!(
                    "{} ({}) must be a non-negative number",
                    name, value
                )));
            }
        }

        if self.base_min_influence > self.max_influence_cap {
            return Err(WindError::Config(format!(
                "base_min_influence ({}) should be <= max_influence_cap ({})",
                self.base_min_influence, self.max_influence_cap
            )));
        }

        Ok(())
    }
}
