//! Intercept system: commits one interceptor per followed, launch-ready object.

use tracing::debug;

use beamwarden_core::params::Params;
use beamwarden_core::state::InterceptCommit;

use crate::predictor::meeting_point;
use crate::registry::Registry;

/// Commit interceptors for followed objects whose velocity is now precise.
/// The meeting point is computed from the object extrapolated by the launch
/// delay and is frozen on the object.
pub fn run(registry: &mut Registry, followed: &[u32], params: &Params) -> Vec<InterceptCommit> {
    let mut commits = Vec::new();

    for &id in followed {
        let Some(mut obj) = registry.get_mut(id) else {
            continue;
        };
        if obj.intercept_committed || !obj.is_launch_ready() {
            continue;
        }

        let velocity = obj.velocity();
        let launch_position = obj.position + velocity * params.interceptor.launch_delay_ms;
        let (point, time) = meeting_point(launch_position, velocity, params.interceptor.speed);

        obj.meet_point = Some(point);
        obj.intercept_committed = true;
        debug!(id, ?point, flight_ms = time, "interceptor committed");

        commits.push(InterceptCommit {
            object_id: id,
            point,
        });
    }

    commits
}
