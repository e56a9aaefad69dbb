//! Snapshot builders: tick output and registry diagnostics.

use beamwarden_core::components::TrackedObject;
use beamwarden_core::state::{Diagnostics, InterceptCommit, TickOutput};
use beamwarden_core::types::SimTime;

use crate::kinematics::Actuator;
use crate::registry::Registry;

pub fn build_output(
    time: &SimTime,
    sensor: &Actuator,
    platform: Option<&Actuator>,
    followed: &[u32],
    intercepts: Vec<InterceptCommit>,
) -> TickOutput {
    TickOutput {
        time: *time,
        sensor_angle: sensor.state.angle,
        platform_angle: platform.map(|p| p.state.angle),
        followed_ids: followed.to_vec(),
        intercepts,
    }
}

pub fn build_diagnostics(registry: &Registry) -> Diagnostics {
    let objects: Vec<TrackedObject> = registry.snapshot();
    Diagnostics {
        priorities: objects.iter().map(|o| (o.id, o.priority)).collect(),
        entry_points: objects.iter().filter_map(|o| o.entry_point).collect(),
        meet_points: objects.iter().filter_map(|o| o.meet_point).collect(),
    }
}
