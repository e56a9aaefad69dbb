//! Systems that run on the registry each tick.
//!
//! Systems are free functions over the registry and the actuators. They do
//! not own state; object state lives in components, actuator state in the
//! controller.

pub mod actuators;
pub mod cleanup;
pub mod ingest;
pub mod intercept;
pub mod prediction;
pub mod scheduler;
pub mod snapshot;
