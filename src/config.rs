//! Configuration for the layout pipeline.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

// ─── Policies ────────────────────────────────────────────────────────────────

/// What to do with vertices the root cannot reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreachablePolicy {
    /// Fail the whole layout with `LayoutError::Unreachable`.
    #[default]
    Reject,
    /// Lay out the reachable part and report the rest.
    Exclude,
}

/// Output format produced by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Svg,
}

// ─── LayoutConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel offset of lane 0 on a shared grid line (subtracted).
    pub lane_padding: f64,
    /// Pixel distance between two adjacent lanes.
    pub lane_step: f64,
    /// Emphasis hint attached to back edges.
    pub back_edge_emphasis: f64,
    pub unreachable: UnreachablePolicy,
    /// Width of the even (corridor) grid columns.
    pub corridor_width: f64,
    /// Height of the even (corridor) grid rows.
    pub corridor_height: f64,
    /// Block size used when the input does not give one.
    pub block_width: f64,
    pub block_height: f64,
    /// Space before grid column 0 and grid row 0.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_padding: 25.0,
            lane_step: 5.0,
            back_edge_emphasis: 0.2,
            unreachable: UnreachablePolicy::Reject,
            corridor_width: 40.0,
            corridor_height: 40.0,
            block_width: 160.0,
            block_height: 60.0,
            margin: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("lane_padding", self.lane_padding),
            ("corridor_width", self.corridor_width),
            ("corridor_height", self.corridor_height),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("margin", self.margin),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !self.lane_step.is_finite() || self.lane_step <= 0.0 {
            return Err(LayoutError::config(format!(
                "lane_step must be positive (got {})",
                self.lane_step
            )));
        }
        if !self.back_edge_emphasis.is_finite() {
            return Err(LayoutError::config("back_edge_emphasis must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
