//! Beam controller for a rotating narrow-beam sensor.
//!
//! Owns the hecs object registry, fuses wide and narrow reports, predicts
//! entry and meeting points, schedules the beam and commits interceptors
//! once per tick.

pub mod engine;
pub mod estimator;
pub mod kinematics;
pub mod predictor;
pub mod registry;
pub mod systems;

pub use beamwarden_core as core;
pub use engine::BeamController;
