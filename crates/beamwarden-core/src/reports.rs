//! Sensor reports ingested by the controller each tick.

use serde::{Deserialize, Serialize};

use crate::types::Vec3;

/// Report from the wide-coverage, low-rate source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideSourceReport {
    pub id: u32,
    pub position: Vec3,
    /// Estimated velocity (m/ms).
    pub velocity: Vec3,
    /// Externally assigned priority overriding the computed score.
    #[serde(default)]
    pub preset_priority: Option<f64>,
}

/// Report from the narrow, high-rate source. Position only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrowSourceReport {
    pub id: u32,
    pub position: Vec3,
}

/// Everything both sources delivered since the previous tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBatch {
    #[serde(default)]
    pub wide: Vec<WideSourceReport>,
    #[serde(default)]
    pub narrow: Vec<NarrowSourceReport>,
}

impl ReportBatch {
    pub fn is_empty(&self) -> bool {
        self.wide.is_empty() && self.narrow.is_empty()
    }
}
