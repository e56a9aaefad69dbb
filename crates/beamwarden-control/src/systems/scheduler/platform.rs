//! Platform heading selection around the platform's blind zones.
//!
//! Dead zones are given relative to the platform heading. A heading `ψ`
//! serves an absolute azimuth `a` when `a − ψ` falls in an allowed offset
//! segment (the complement of the dead zones, shrunk by the margin).

use std::f64::consts::PI;

use beamwarden_core::geometry::{angle_span, invert_segments, segment_containing, shift_segments, Segment};

/// Offsets from the heading the sensor may look along.
pub fn allowed_offsets(dead_zones: &[Segment], margin: f64) -> Vec<Segment> {
    invert_segments(dead_zones, Segment::new(-PI, PI), margin)
}

/// Dead zones in absolute azimuth for a platform at `heading`.
pub fn projected_dead_zones(dead_zones: &[Segment], heading: f64) -> Vec<Segment> {
    shift_segments(dead_zones, heading)
}

/// Heading closest to `reference` that puts every angle in one allowed
/// segment. `None` when no segment can hold them all.
pub fn heading_for(angles: &[f64], reference: f64, allowed: &[Segment]) -> Option<f64> {
    let (lo, hi) = angle_span(angles)?;
    allowed
        .iter()
        .filter_map(|seg| {
            // lo − ψ ≥ seg.start and hi − ψ ≤ seg.end.
            let min_heading = hi - seg.end;
            let max_heading = lo - seg.start;
            (min_heading <= max_heading).then(|| reference.clamp(min_heading, max_heading))
        })
        .min_by(|a, b| (a - reference).abs().total_cmp(&(b - reference).abs()))
}

/// How far the heading can rise and fall while every angle stays in the
/// allowed segment that currently holds it. Angles outside every segment
/// do not constrain.
fn heading_slack(angles: &[f64], heading: f64, allowed: &[Segment]) -> (f64, f64) {
    let absolute = shift_segments(allowed, heading);
    angles
        .iter()
        .filter_map(|&a| segment_containing(&absolute, a).map(|seg| (a - seg.start, seg.end - a)))
        .fold((f64::INFINITY, f64::INFINITY), |(up, down), (u, d)| (up.min(u), down.min(d)))
}

/// Nudge `heading` so `next` leaves the projected dead zones (widened by
/// `margin`), on whichever side needs less rotation, without moving any of
/// `followed` out of its allowed segment.
pub fn nudge_clear_of(
    heading: f64,
    next: f64,
    followed: &[f64],
    dead_zones: &[Segment],
    allowed: &[Segment],
    margin: f64,
) -> f64 {
    let projected = projected_dead_zones(dead_zones, heading);
    let Some(zone) = projected.iter().map(|z| z.widened(margin)).find(|z| z.contains(next)) else {
        return heading;
    };

    let (max_up, max_down) = heading_slack(followed, heading, allowed);
    // Rising moves the zone past `next`; falling moves it below.
    let need_up = next - zone.start;
    let need_down = zone.end - next;

    if need_down <= need_up {
        heading - need_down.min(max_down)
    } else {
        heading + need_up.min(max_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_stays_when_angles_allowed() {
        let allowed = allowed_offsets(&[Segment::new(-0.5, 0.5)], 0.05);
        // Angles at offsets 1.0..1.5 from heading 0 are clear already.
        assert_eq!(heading_for(&[1.0, 1.5], 0.0, &allowed), Some(0.0));
    }

    #[test]
    fn test_heading_moves_minimally_out_of_dead_zone() {
        let allowed = allowed_offsets(&[Segment::new(-0.5, 0.5)], 0.05);
        // 0.2 sits in the dead zone; rising would need 0.85, falling 0.35.
        let heading = heading_for(&[0.2, 0.3], 0.0, &allowed).unwrap();
        assert!((heading - (-0.35)).abs() < 1e-12, "heading {heading}");
        let zones = projected_dead_zones(&[Segment::new(-0.5, 0.5)], heading);
        assert!(!zones[0].widened(0.05 - 1e-9).contains(0.2));
    }

    #[test]
    fn test_heading_infeasible_span() {
        // Allowed segments are at most ~2.5 rad wide; a 3 rad span cannot fit.
        let allowed = allowed_offsets(&[Segment::new(-0.5, 0.5)], 0.05);
        assert_eq!(heading_for(&[-1.5, 1.5], 0.0, &allowed), None);
        assert_eq!(heading_for(&[], 0.0, &allowed), None);
    }

    #[test]
    fn test_nudge_clear_of_prefers_smaller_rotation() {
        let dead = [Segment::new(-0.2, 0.2)];
        let allowed = allowed_offsets(&dead, 0.0);
        // Next object at 0.15 is near the top edge: fall by 0.05 + margin.
        let heading = nudge_clear_of(0.0, 0.15, &[], &dead, &allowed, 0.01);
        assert!((heading - (-0.06)).abs() < 1e-12, "heading {heading}");

        // Outside the zone: untouched.
        assert_eq!(nudge_clear_of(0.0, 0.5, &[], &dead, &allowed, 0.01), 0.0);
    }

    #[test]
    fn test_nudge_respects_followed_slack() {
        let dead = [Segment::new(-0.2, 0.2)];
        let allowed = allowed_offsets(&dead, 0.0);
        // A followed object at -0.22 sits 0.02 below the allowed edge at -0.2;
        // falling may only use that slack.
        let heading = nudge_clear_of(0.0, 0.15, &[-0.22], &dead, &allowed, 0.01);
        assert!((heading - (-0.02)).abs() < 1e-12, "heading {heading}");
    }
}
