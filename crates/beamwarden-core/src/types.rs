//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D vector in sensor-centred space (meters, Cartesian).
/// x = East, y = North, z = Up. The sensor sits at the origin.
pub type Vec3 = glam::DVec3;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }
}

/// Live state of a rotating actuator (the narrow sensor or its platform).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorState {
    /// Azimuth in radians.
    pub angle: f64,
    /// Signed angular speed in radians per millisecond.
    pub angular_speed: f64,
}

impl ActuatorState {
    pub fn at_rest(angle: f64) -> Self {
        Self {
            angle,
            angular_speed: 0.0,
        }
    }
}

/// Target an actuator is steering toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandedState {
    /// Target azimuth in radians.
    pub angle: f64,
    /// Cruising speed limit (radians per millisecond, positive).
    pub cruise_speed: f64,
    /// Time budget to arrive. `None` means as soon as possible.
    pub time_to_reach_ms: Option<f64>,
}

impl CommandedState {
    pub fn asap(angle: f64, cruise_speed: f64) -> Self {
        Self {
            angle,
            cruise_speed,
            time_to_reach_ms: None,
        }
    }
}
