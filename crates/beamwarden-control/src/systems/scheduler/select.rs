//! Greedy, priority-ordered selection of the followed set.

use std::collections::HashMap;

use tracing::trace;

use beamwarden_core::geometry::angle_span;

use super::beam::{time_to_cover, window_contains};
use super::Candidate;
use crate::kinematics::Actuator;

/// Objects chosen for the beam and every angle they require.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub ids: Vec<u32>,
    pub angles: Vec<f64>,
}

impl Selection {
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `angles` can join without the span exceeding `width`.
    pub fn fits(&self, angles: &[f64], width: f64) -> bool {
        let mut all = Vec::with_capacity(self.angles.len() + angles.len());
        all.extend_from_slice(&self.angles);
        all.extend_from_slice(angles);
        angle_span(&all).map_or(true, |(lo, hi)| hi - lo <= width)
    }

    pub fn push(&mut self, candidate: &Candidate) {
        self.ids.push(candidate.id);
        self.angles.extend_from_slice(&candidate.angles);
    }
}

/// Inputs shared by every scan in one scheduling pass.
pub struct ScanContext<'a> {
    /// Followed set from the previous tick.
    pub previous: &'a [u32],
    /// Every schedulable object by id.
    pub lookup: &'a HashMap<u32, &'a Candidate>,
    pub sensor: &'a Actuator,
    pub view: f64,
    pub margin: f64,
    /// Widest span one beam position serves.
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every candidate in the list was considered.
    Completed,
    /// A candidate threatened followed objects; the selection was replaced
    /// by the objects that had to be kept and the scan stopped.
    Preempted,
}

/// Walk `list` in priority order, adding every candidate that fits in one
/// window with the current selection and does not endanger a followed
/// object.
pub fn scan(list: &[Candidate], selection: &mut Selection, ctx: &ScanContext<'_>) -> ScanOutcome {
    let will = ctx.sensor.reference_angle();

    for candidate in list {
        if selection.contains(candidate.id) || !selection.fits(&candidate.angles, ctx.width) {
            continue;
        }

        let within_will = candidate
            .angles
            .iter()
            .all(|&a| window_contains(will, a, ctx.view, ctx.margin));
        if !within_will && !ctx.previous.contains(&candidate.id) {
            if let Some(kept) = preemption_conflict(candidate, ctx) {
                trace!(
                    candidate = candidate.id,
                    kept = ?kept.ids,
                    "candidate rejected in favour of followed objects"
                );
                *selection = kept;
                return ScanOutcome::Preempted;
            }
        }

        selection.push(candidate);
    }

    ScanOutcome::Completed
}

/// Followed objects that cannot be given up for `candidate`, if they also
/// cannot share a window with it.
///
/// A followed object must be kept when its interceptor is committed, when
/// it is ready for one, or when the sensor can finish it and still rotate
/// to the candidate before the candidate reaches the near zone. Kept
/// objects are gathered by priority and only while they fit one window;
/// objects that drifted apart lose the beam lowest priority first.
pub fn preemption_conflict(candidate: &Candidate, ctx: &ScanContext<'_>) -> Option<Selection> {
    let rotation = time_to_cover(ctx.sensor, &candidate.angles, ctx.view, ctx.margin);

    let mut must_keep: Vec<&Candidate> = Vec::with_capacity(ctx.previous.len());
    for id in ctx.previous {
        // Objects that lost their entry or meeting point are no longer followable.
        let Some(&followed) = ctx.lookup.get(id) else {
            trace!(id, "followed object no longer schedulable");
            continue;
        };
        let finishable = followed.time_to_meet + rotation < candidate.time_to_near;
        if followed.committed || followed.launch_ready || finishable {
            must_keep.push(followed);
        }
    }
    must_keep.sort_by(|a, b| b.priority.total_cmp(&a.priority).then(a.id.cmp(&b.id)));

    let mut kept = Selection::default();
    for followed in must_keep {
        if kept.fits(&followed.angles, ctx.width) {
            kept.push(followed);
        } else {
            trace!(id = followed.id, "kept object no longer fits the window");
        }
    }

    if kept.is_empty() || kept.fits(&candidate.angles, ctx.width) {
        None
    } else {
        Some(kept)
    }
}
