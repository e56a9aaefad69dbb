//! Core types and definitions for the beamwarden sensor controller.
//!
//! This crate defines the vocabulary shared by the control crate and its
//! collaborators: object components, sensor reports, parameters, output
//! snapshots, geometry primitives and constants. It has no runtime
//! dependencies beyond serialization and math.

pub mod components;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod params;
pub mod reports;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
