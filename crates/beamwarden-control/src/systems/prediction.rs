//! Prediction system: refreshes entry, near and meeting points and the
//! priority of objects whose measurement confidence changed.

use beamwarden_core::components::{PredictionFlags, TrackedObject};
use beamwarden_core::geometry::Segment;
use beamwarden_core::params::Params;

use crate::kinematics::Actuator;
use crate::predictor::{entry_point, meeting_point, priority};
use crate::registry::Registry;
use crate::systems::scheduler::beam::time_to_cover;

/// Refresh every object with pending prediction flags.
pub fn run(registry: &mut Registry, params: &Params, sensor: &Actuator) {
    for (_entity, obj) in registry.world_mut().query_mut::<&mut TrackedObject>() {
        if !obj.needs.any() {
            continue;
        }
        refresh(obj, params, sensor);
        obj.needs = PredictionFlags::default();
    }
}

fn refresh(obj: &mut TrackedObject, params: &Params, sensor: &Actuator) {
    let velocity = obj.velocity();

    if obj.needs.entry {
        obj.entry_point = entry_point(obj.position, velocity, params.sensor.radius);
    }
    if obj.needs.near {
        obj.near_point = entry_point(obj.position, velocity, params.near_radius());
    }

    if obj.priority.is_none() && (obj.needs.entry || obj.needs.meet) {
        let score = obj.preset_priority.unwrap_or_else(|| {
            priority(obj.position, velocity, params.scheduling.max_target_speed)
        });
        obj.priority = Some(score);
    }

    // A committed meeting point is final.
    if obj.needs.meet && !obj.intercept_committed {
        let lead = time_to_hit(obj, params, sensor);
        let (point, _) = meeting_point(obj.position + velocity * lead, velocity, params.interceptor.speed);
        obj.meet_point = Some(point);
    }
}

/// Earliest time (ms) an interceptor could leave against `obj`: the launch
/// delay plus the time to gather a precise velocity.
///
/// Inside the beam that is the remaining narrow samples. Otherwise the
/// sensor first has to rotate onto the object and, for an object still
/// outside coverage, wait for it to enter and collect every sample.
pub fn time_to_hit(obj: &TrackedObject, params: &Params, sensor: &Actuator) -> f64 {
    let beam = Segment::centered(sensor.state.angle, params.sensor.view_angle);
    let in_coverage = obj.is_within(params.sensor.radius);

    let acquire = if in_coverage && beam.contains(obj.position_angle()) {
        params.sampling_time_ms(obj.samples_to_precise())
    } else {
        let rotation = time_to_cover(
            sensor,
            &[obj.position_angle()],
            params.sensor.view_angle,
            params.scheduling.margin_angle,
        );
        match obj.time_to_entry() {
            Some(entry) if !in_coverage => {
                rotation.max(entry + params.sampling_time_ms(obj.thresholds.narrow))
            }
            _ => rotation,
        }
    };

    params.interceptor.launch_delay_ms + acquire
}
