//! Per-object tracking state stored in the registry's ECS world.

use serde::{Deserialize, Serialize};

use crate::geometry::{azimuth, horizontal_distance};
use crate::types::Vec3;

/// Which predictions must be recomputed on the next refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFlags {
    pub entry: bool,
    pub near: bool,
    pub meet: bool,
}

impl PredictionFlags {
    pub fn all() -> Self {
        Self {
            entry: true,
            near: true,
            meet: true,
        }
    }

    pub fn any(&self) -> bool {
        self.entry || self.near || self.meet
    }
}

/// Measurement counts at which an object's estimate changes confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub wide: u32,
    pub narrow: u32,
    pub approx_narrow: u32,
}

/// A moving object reported by the wide and/or narrow source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: u32,
    pub preset_priority: Option<f64>,
    /// Scheduling priority. Objects without one are never scheduled.
    pub priority: Option<f64>,
    /// Filtered position.
    pub position: Vec3,
    /// Filtered velocity (m/ms).
    pub filtered_speed: Vec3,
    /// Last raw narrow sample, for duplicate suppression.
    pub raw_position: Option<Vec3>,
    /// Last wide-source position, for duplicate suppression.
    pub wide_position: Option<Vec3>,
    pub wide_speed: Vec3,
    /// Where the trajectory crosses the sensor coverage circle.
    pub entry_point: Option<Vec3>,
    /// Where the trajectory crosses the near (urgent) circle.
    pub near_point: Option<Vec3>,
    /// Where an interceptor can meet the object.
    pub meet_point: Option<Vec3>,
    pub wide_count: u32,
    pub narrow_count: u32,
    pub thresholds: Thresholds,
    pub needs: PredictionFlags,
    pub intercept_committed: bool,
    /// Simulation time of the last accepted update from either source (ms).
    pub last_update_ms: f64,
    /// Simulation time of the last accepted narrow sample (ms).
    pub last_narrow_ms: f64,
    pub death_timeout_ms: f64,
}

impl TrackedObject {
    /// Velocity the predictor should trust: the filter estimate once enough
    /// narrow samples arrived, the wide-source estimate before that.
    pub fn velocity(&self) -> Vec3 {
        if self.narrow_count >= self.thresholds.approx_narrow {
            self.filtered_speed
        } else {
            self.wide_speed
        }
    }

    /// Precise velocity collected; an interceptor may be committed.
    pub fn is_launch_ready(&self) -> bool {
        self.narrow_count >= self.thresholds.narrow
    }

    /// Narrow samples still missing before the object is launch-ready.
    pub fn samples_to_precise(&self) -> u32 {
        self.thresholds.narrow.saturating_sub(self.narrow_count)
    }

    pub fn is_dead(&self, now_ms: f64) -> bool {
        now_ms - self.last_update_ms >= self.death_timeout_ms
    }

    /// Horizontally within `radius` of the sensor.
    pub fn is_within(&self, radius: f64) -> bool {
        self.position.truncate().length() <= radius
    }

    pub fn position_angle(&self) -> f64 {
        azimuth(self.position)
    }

    pub fn entry_angle(&self) -> Option<f64> {
        self.entry_point.map(azimuth)
    }

    pub fn near_angle(&self) -> Option<f64> {
        self.near_point.map(azimuth)
    }

    pub fn meet_angle(&self) -> Option<f64> {
        self.meet_point.map(azimuth)
    }

    /// Time for the object to reach `point` at its trusted speed (ms).
    /// Infinite for a stationary object.
    pub fn time_to(&self, point: Vec3) -> f64 {
        let speed = self.velocity().length();
        if speed <= 0.0 {
            return f64::INFINITY;
        }
        self.position.distance(point) / speed
    }

    /// Time to the coverage circle, measured horizontally.
    pub fn time_to_entry(&self) -> Option<f64> {
        let entry = self.entry_point?;
        let speed = self.velocity().truncate().length();
        if speed <= 0.0 {
            return Some(f64::INFINITY);
        }
        Some(horizontal_distance(self.position, entry) / speed)
    }

    pub fn time_to_near(&self) -> Option<f64> {
        self.near_point.map(|p| self.time_to(p))
    }

    pub fn time_to_meet(&self) -> Option<f64> {
        self.meet_point.map(|p| self.time_to(p))
    }

    /// Azimuths the beam must cover to serve this object: the meeting
    /// azimuth if known, then the entry azimuth or, failing that, the
    /// current azimuth. The first entry is the primary angle.
    pub fn required_angles(&self) -> Vec<f64> {
        let mut angles = Vec::with_capacity(2);
        if let Some(meet) = self.meet_angle() {
            angles.push(meet);
        }
        angles.push(self.entry_angle().unwrap_or_else(|| self.position_angle()));
        angles
    }
}
