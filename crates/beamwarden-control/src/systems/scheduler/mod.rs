//! Beam scheduler: picks the followed set and the sensor (and platform)
//! commands for the next tick.
//!
//! Objects whose meeting points fall in the responsible sector are served
//! first, greedily by priority. Objects outside it get the beam only when no
//! inside object needs it, or when they fit into the window anyway.

pub mod beam;
pub mod platform;
pub mod select;

use std::collections::HashMap;

use tracing::trace;

use beamwarden_core::components::TrackedObject;
use beamwarden_core::geometry::{angle_span, in_any_segment, Segment};
use beamwarden_core::params::Params;
use beamwarden_core::types::CommandedState;

use crate::kinematics::Actuator;

use self::beam::{beam_angle_for_angles, pre_aim, window_contains};
use self::platform::{allowed_offsets, heading_for, nudge_clear_of, projected_dead_zones};
use self::select::{ScanContext, Selection};

/// Scheduling view of one object, taken after prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: u32,
    pub priority: f64,
    /// Required azimuths; the first is the primary angle.
    pub angles: Vec<f64>,
    pub position_angle: f64,
    /// Infinite when the meeting point is unknown.
    pub time_to_meet: f64,
    /// Infinite when the trajectory never enters the near zone.
    pub time_to_near: f64,
    pub committed: bool,
    pub launch_ready: bool,
}

impl Candidate {
    /// `None` unless the object can be followed: it needs a priority, an
    /// entry point and a meeting point.
    pub fn from_object(obj: &TrackedObject) -> Option<Self> {
        obj.entry_point?;
        obj.meet_point?;
        Some(Self {
            id: obj.id,
            priority: obj.priority?,
            angles: obj.required_angles(),
            position_angle: obj.position_angle(),
            time_to_meet: obj.time_to_meet().unwrap_or(f64::INFINITY),
            time_to_near: obj.time_to_near().unwrap_or(f64::INFINITY),
            committed: obj.intercept_committed,
            launch_ready: obj.is_launch_ready(),
        })
    }

    pub fn primary_angle(&self) -> f64 {
        self.angles.first().copied().unwrap_or(self.position_angle)
    }
}

/// Schedulable objects split by responsible sector, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct CandidateLists {
    pub inside: Vec<Candidate>,
    pub outside: Vec<Candidate>,
}

impl CandidateLists {
    fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.inside.iter().chain(self.outside.iter())
    }
}

/// Split the followable `objects` by whether their meeting azimuth lies
/// in `sector`.
pub fn partition(objects: &[TrackedObject], sector: &Segment) -> CandidateLists {
    let mut lists = CandidateLists::default();
    for obj in objects {
        let Some(candidate) = Candidate::from_object(obj) else {
            continue;
        };
        if obj.meet_angle().is_some_and(|a| sector.contains(a)) {
            lists.inside.push(candidate);
        } else {
            lists.outside.push(candidate);
        }
    }

    let by_priority =
        |a: &Candidate, b: &Candidate| b.priority.total_cmp(&a.priority).then(a.id.cmp(&b.id));
    lists.inside.sort_by(by_priority);
    lists.outside.sort_by(by_priority);
    lists
}

/// The platform as the scheduler sees it.
pub struct PlatformView<'a> {
    pub actuator: &'a Actuator,
    /// Dead zones relative to the platform heading.
    pub dead_zones: &'a [Segment],
}

/// Result of one scheduling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub followed: Vec<u32>,
    pub sensor_command: Option<CommandedState>,
    pub platform_command: Option<CommandedState>,
}

/// Run one scheduling pass.
pub fn run(
    lists: &CandidateLists,
    previous: &[u32],
    sensor: &Actuator,
    platform: Option<PlatformView<'_>>,
    params: &Params,
) -> Schedule {
    let view = params.sensor.view_angle;
    let margin = params.scheduling.margin_angle;
    let width = params.window_width();

    let lookup: HashMap<u32, &Candidate> = lists.iter().map(|c| (c.id, c)).collect();
    let ctx = ScanContext {
        previous,
        lookup: &lookup,
        sensor,
        view,
        margin,
        width,
    };

    // Step 1: objects this sensor is responsible for.
    let mut selection = Selection::default();
    select::scan(&lists.inside, &mut selection, &ctx);

    // Step 2: outside objects take over only an idle beam.
    let inside_selected = !selection.is_empty();
    if !inside_selected {
        select::scan(&lists.outside, &mut selection, &ctx);
    }

    // Step 3: platform heading that keeps the followed angles out of its dead zones.
    let platform_plan = platform.map(|p| {
        let allowed = allowed_offsets(p.dead_zones, margin);
        let reference = p.actuator.reference_angle();
        let heading = heading_for(&selection.angles, reference, &allowed).unwrap_or(reference);
        (p, allowed, heading)
    });
    let blind: Vec<Segment> = platform_plan
        .as_ref()
        .map(|(p, _, heading)| projected_dead_zones(p.dead_zones, *heading))
        .unwrap_or_default();

    // Step 4: outside objects that happen to fit ride along.
    if inside_selected {
        for candidate in &lists.outside {
            if !selection.contains(candidate.id)
                && selection.fits(&candidate.angles, width)
                && !in_any_segment(&blind, candidate.primary_angle())
            {
                selection.push(candidate);
            }
        }
    }

    // Step 5: sensor angle covering the followed window.
    let commanded = sensor.command.map(|c| c.angle);
    let mut sensor_command =
        match beam_angle_for_angles(sensor.state.angle, commanded, &selection.angles, view, margin) {
            Some(angle) => Some(sensor.command_asap(angle)),
            None => sensor.command.map(|c| sensor.command_asap(c.angle)),
        };

    // Step 6: pre-aim toward the next unserved object; unhurried when the
    // followed objects are already in the beam.
    let next = lists.iter().find(|c| !selection.contains(c.id));
    let settled = !selection.is_empty()
        && selection
            .angles
            .iter()
            .all(|&a| window_contains(sensor.state.angle, a, view, margin));

    if let (Some(next), Some(span)) = (next, angle_span(&selection.angles)) {
        if let Some(cmd) = sensor_command.as_mut() {
            cmd.angle = pre_aim(cmd.angle, span, next.position_angle, view, margin);
            if settled {
                cmd.time_to_reach_ms = latest_meet(&selection, &lookup)
                    .map(|t| t + params.scheduling.margin_time_ms);
            }
        }
    }

    // Step 7: platform command, nudged so the next object leaves its dead zones.
    let platform_command = platform_plan.map(|(p, allowed, heading)| {
        let heading = match next {
            Some(next) if settled => nudge_clear_of(
                heading,
                next.position_angle,
                &selection.angles,
                p.dead_zones,
                &allowed,
                margin,
            ),
            _ => heading,
        };
        // The platform shares the sensor's deadline.
        CommandedState {
            time_to_reach_ms: sensor_command.and_then(|c| c.time_to_reach_ms),
            ..p.actuator.command_asap(heading)
        }
    });

    trace!(
        followed = ?selection.ids,
        sensor = ?sensor_command.map(|c| c.angle),
        "schedule"
    );

    Schedule {
        followed: selection.ids,
        sensor_command,
        platform_command,
    }
}

/// Latest finite time-to-meet among the selected objects.
fn latest_meet(selection: &Selection, lookup: &HashMap<u32, &Candidate>) -> Option<f64> {
    selection
        .ids
        .iter()
        .filter_map(|id| lookup.get(id))
        .map(|c| c.time_to_meet)
        .filter(|t| t.is_finite())
        .reduce(f64::max)
}
