//! Alpha-beta state estimator for narrow-source samples.
//!
//! Gains follow the growing-memory schedule `α = 2(2n−1)/(n(n+1))`,
//! `β = 6/(n(n+1))` until the sample index reaches the ceiling, after which
//! the filter runs with fixed gains. Axes are filtered independently.

use beamwarden_core::types::Vec3;

/// Position and velocity estimate after one filter step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Alpha-beta filter with a gain-schedule ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBetaFilter {
    gain_ceiling: u32,
}

impl AlphaBetaFilter {
    pub fn new(gain_ceiling: u32) -> Self {
        Self {
            gain_ceiling: gain_ceiling.max(2),
        }
    }

    /// Gains for sample index `n` (clamped to the ceiling). Only meaningful
    /// for `n >= 2`; the first two samples bootstrap the state directly.
    pub fn gains(&self, n: u32) -> (f64, f64) {
        let n = n.clamp(2, self.gain_ceiling) as f64;
        let alpha = 2.0 * (2.0 * n - 1.0) / (n * (n + 1.0));
        let beta = 6.0 / (n * (n + 1.0));
        (alpha, beta)
    }

    /// Filter one axis. `sample_index` counts previously accepted samples.
    pub fn step_axis(
        &self,
        measured: f64,
        prev_position: f64,
        prev_speed: f64,
        dt: f64,
        sample_index: u32,
    ) -> (f64, f64) {
        match sample_index {
            0 => (measured, 0.0),
            1 => (measured, (measured - prev_position) / dt),
            n => {
                let (alpha, beta) = self.gains(n);
                let predicted = prev_position + prev_speed * dt;
                let position = predicted + alpha * (measured - predicted);
                let speed = prev_speed + beta / dt * (measured - position);
                (position, speed)
            }
        }
    }

    /// Filter a 3D sample.
    pub fn step(
        &self,
        measured: Vec3,
        prev: Estimate,
        dt: f64,
        sample_index: u32,
    ) -> Estimate {
        let (px, vx) = self.step_axis(measured.x, prev.position.x, prev.velocity.x, dt, sample_index);
        let (py, vy) = self.step_axis(measured.y, prev.position.y, prev.velocity.y, dt, sample_index);
        let (pz, vz) = self.step_axis(measured.z, prev.position.z, prev.velocity.z, dt, sample_index);
        Estimate {
            position: Vec3::new(px, py, pz),
            velocity: Vec3::new(vx, vy, vz),
        }
    }
}
