//! Ingest system: merges wide and narrow reports into tracked objects.
//!
//! Narrow reports are applied first and take precedence: an object that got
//! a narrow sample this tick ignores its wide report. Only wide reports
//! create objects.

use std::collections::HashSet;

use tracing::{debug, trace};

use beamwarden_core::components::{PredictionFlags, Thresholds, TrackedObject};
use beamwarden_core::params::Params;
use beamwarden_core::reports::{ReportBatch, WideSourceReport};
use beamwarden_core::types::Vec3;

use crate::estimator::{AlphaBetaFilter, Estimate};
use crate::registry::Registry;

/// Apply one tick's reports at simulation time `now_ms`.
pub fn run(
    registry: &mut Registry,
    batch: &ReportBatch,
    now_ms: f64,
    params: &Params,
    filter: &AlphaBetaFilter,
) {
    let mut narrow_updated: HashSet<u32> = HashSet::with_capacity(batch.narrow.len());

    for report in &batch.narrow {
        let Some(mut obj) = registry.get_mut(report.id) else {
            trace!(id = report.id, "narrow report for unknown object ignored");
            continue;
        };
        apply_narrow(&mut obj, report.position, now_ms, filter);
        narrow_updated.insert(report.id);
    }

    for report in &batch.wide {
        if narrow_updated.contains(&report.id) {
            continue;
        }
        if let Some(mut obj) = registry.get_mut(report.id) {
            apply_wide(&mut obj, report, now_ms);
            continue;
        }

        let mut obj = new_object(report.id, now_ms, params);
        apply_wide(&mut obj, report, now_ms);
        debug!(id = report.id, position = ?report.position, "new object");
        registry.spawn(obj);
    }
}

fn new_object(id: u32, now_ms: f64, params: &Params) -> TrackedObject {
    TrackedObject {
        id,
        preset_priority: None,
        priority: None,
        position: Vec3::ZERO,
        filtered_speed: Vec3::ZERO,
        raw_position: None,
        wide_position: None,
        wide_speed: Vec3::ZERO,
        entry_point: None,
        near_point: None,
        meet_point: None,
        wide_count: 0,
        narrow_count: 0,
        thresholds: Thresholds {
            wide: params.tracking.wide_threshold,
            narrow: params.tracking.narrow_threshold,
            approx_narrow: params.tracking.approx_narrow_threshold,
        },
        needs: PredictionFlags::default(),
        intercept_committed: false,
        last_update_ms: now_ms,
        last_narrow_ms: now_ms,
        death_timeout_ms: params.tracking.death_timeout_ms,
    }
}

/// Apply a wide report. Always refreshes liveness; a repeated position
/// changes nothing else.
pub fn apply_wide(obj: &mut TrackedObject, report: &WideSourceReport, now_ms: f64) {
    obj.last_update_ms = now_ms;
    if obj.wide_position == Some(report.position) {
        return;
    }

    obj.position = report.position;
    obj.wide_position = Some(report.position);
    obj.wide_speed = report.velocity;
    if report.preset_priority.is_some() {
        obj.preset_priority = report.preset_priority;
    }

    obj.wide_count += 1;
    if obj.wide_count >= obj.thresholds.wide {
        obj.needs = PredictionFlags::all();
    }
    // The wide position replaced the filter state; restart the filter.
    obj.narrow_count = 0;
}

/// Run one narrow sample through the filter. Returns false when the sample
/// was a duplicate or arrived without time passing.
pub fn apply_narrow(
    obj: &mut TrackedObject,
    position: Vec3,
    now_ms: f64,
    filter: &AlphaBetaFilter,
) -> bool {
    if obj.raw_position == Some(position) {
        trace!(id = obj.id, "duplicate narrow sample");
        return false;
    }

    let dt = now_ms - obj.last_narrow_ms;
    if obj.narrow_count >= 1 && dt <= 0.0 {
        trace!(id = obj.id, dt, "narrow sample without elapsed time");
        return false;
    }

    let prev = Estimate {
        position: obj.position,
        velocity: obj.filtered_speed,
    };
    let est = filter.step(position, prev, dt, obj.narrow_count);
    obj.position = est.position;
    obj.filtered_speed = est.velocity;
    obj.raw_position = Some(position);
    obj.last_update_ms = now_ms;
    obj.last_narrow_ms = now_ms;

    if obj.narrow_count >= obj.thresholds.approx_narrow {
        obj.needs = PredictionFlags::all();
    }
    obj.narrow_count += 1;
    true
}
