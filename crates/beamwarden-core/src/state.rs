//! Controller output: the per-tick result and diagnostic snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{SimTime, Vec3};

/// Commitment of one interceptor against one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptCommit {
    pub object_id: u32,
    /// Predicted meeting point at commitment time.
    pub point: Vec3,
}

/// Result of one controller tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub time: SimTime,
    /// Sensor azimuth after the actuator advanced.
    pub sensor_angle: f64,
    /// Platform azimuth, when a platform is configured.
    pub platform_angle: Option<f64>,
    /// Objects the sensor is aimed at, in selection order.
    pub followed_ids: Vec<u32>,
    /// Interceptors committed this tick.
    pub intercepts: Vec<InterceptCommit>,
}

/// Read-only view of the registry for displays and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Priority per object id (`None` until computed).
    pub priorities: BTreeMap<u32, Option<f64>>,
    /// Known entry points, ordered by object id.
    pub entry_points: Vec<Vec3>,
    /// Known meeting points, ordered by object id.
    pub meet_points: Vec<Vec3>,
}
