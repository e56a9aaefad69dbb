//! Beam positioning: which sensor azimuth covers a set of required angles
//! with the least rotation.

use beamwarden_core::geometry::angle_span;

use crate::kinematics::Actuator;

/// Usable window `[center − half + margin, center + half − margin]`.
pub fn window_contains(center: f64, angle: f64, view: f64, margin: f64) -> bool {
    let half = view / 2.0;
    center - half + margin <= angle && angle <= center + half - margin
}

/// Beam azimuth covering `first` and `second` (either may be unknown).
///
/// In order of preference:
/// 1. keep the commanded angle if its window already covers both;
/// 2. stay at the current angle if its window covers both;
/// 3. if the two cannot share a window, put `first` just inside the edge
///    facing `second`;
/// 4. if one is covered, rotate just far enough to bring the other inside;
/// 5. otherwise rotate just far enough to bring the nearer pair edge inside.
pub fn beam_angle_for_pair(
    current: f64,
    commanded: Option<f64>,
    first: Option<f64>,
    second: Option<f64>,
    view: f64,
    margin: f64,
) -> f64 {
    let half = view / 2.0;
    let covered = |center: f64, angle: Option<f64>| {
        angle.map_or(true, |a| window_contains(center, a, view, margin))
    };

    if let Some(target) = commanded {
        if covered(target, first) && covered(target, second) {
            return target;
        }
    }

    let first_in = covered(current, first);
    let second_in = covered(current, second);
    if first_in && second_in {
        return current;
    }

    let lower_edge = current - half + margin;

    if let (Some(f), Some(s)) = (first, second) {
        if (f - s).abs() >= view - 2.0 * margin {
            return if f > s { f - half + margin } else { f + half - margin };
        }
    }

    if first_in || second_in {
        let outside = if first_in { second } else { first };
        if let Some(angle) = outside {
            return if angle < lower_edge {
                angle + half - margin
            } else {
                angle - half + margin
            };
        }
    }

    match (first, second) {
        (Some(f), Some(s)) if f < lower_edge => f.min(s) + half - margin,
        (Some(f), Some(s)) => f.max(s) - half + margin,
        _ => current,
    }
}

/// Beam azimuth covering every angle in `angles`; `None` when empty.
pub fn beam_angle_for_angles(
    current: f64,
    commanded: Option<f64>,
    angles: &[f64],
    view: f64,
    margin: f64,
) -> Option<f64> {
    let (lo, hi) = angle_span(angles)?;
    Some(beam_angle_for_pair(current, commanded, Some(lo), Some(hi), view, margin))
}

/// Rotation time until the sensor covers `angles`.
pub fn time_to_cover(sensor: &Actuator, angles: &[f64], view: f64, margin: f64) -> f64 {
    let commanded = sensor.command.map(|c| c.angle);
    match beam_angle_for_angles(sensor.state.angle, commanded, angles, view, margin) {
        Some(target) => sensor.time_to_rotate(target),
        None => 0.0,
    }
}

/// Shift `command` toward `next` as far as the followed angles allow.
/// The window keeps covering `[lo, hi]` and never moves past `next`.
pub fn pre_aim(command: f64, span: (f64, f64), next: f64, view: f64, margin: f64) -> f64 {
    let half = view / 2.0 - margin;
    let (lo, hi) = span;
    if next > command {
        let slack = (lo - (command - half)).max(0.0);
        command + slack.min(next - command)
    } else {
        let slack = ((command + half) - hi).max(0.0);
        command - slack.min(command - next)
    }
}
