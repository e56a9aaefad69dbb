//! Geometric prediction: coverage entry points, meeting points and priority.
//!
//! Objects are assumed to fly straight at constant velocity. The sensor and
//! the interceptor launcher both sit at the origin.

use beamwarden_core::constants::*;
use beamwarden_core::geometry::{circle_line_intersections, distance_to_line, horizontal_distance};
use beamwarden_core::types::Vec3;

/// Point where the straight-line trajectory crosses the horizontal circle of
/// `radius` around the sensor, or `None` if it never does.
///
/// With two crossings the one nearer to the current position wins. Height
/// is extrapolated from the horizontal time to reach the crossing.
pub fn entry_point(position: Vec3, velocity: Vec3, radius: f64) -> Option<Vec3> {
    let crossings = circle_line_intersections(position, velocity, radius);
    let mut nearest = crossings.into_iter().min_by(|a, b| {
        horizontal_distance(position, *a).total_cmp(&horizontal_distance(position, *b))
    })?;

    let horizontal_speed = velocity.truncate().length();
    if horizontal_speed < GEOMETRY_EPS {
        return None;
    }
    let time = horizontal_distance(position, nearest) / horizontal_speed;
    nearest.z = position.z + velocity.z * time;
    Some(nearest)
}

/// Earliest point where an interceptor launched from the origin at
/// `interceptor_speed` meets the object, and the time to get there (ms).
///
/// Binary search over `[0, MEET_SEARCH_HORIZON_MS]`. When the object
/// cannot be caught inside the horizon, the horizon point is returned.
pub fn meeting_point(position: Vec3, velocity: Vec3, interceptor_speed: f64) -> (Vec3, f64) {
    let reachable = |t: f64| interceptor_speed * t >= (position + velocity * t).length();

    let mut lo = 0.0;
    let mut hi = MEET_SEARCH_HORIZON_MS;
    while hi - lo > MEET_SEARCH_TOLERANCE_MS {
        let mid = 0.5 * (lo + hi);
        if reachable(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    (position + velocity * hi, hi)
}

/// Threat score in `[0, 1]`: close passes dominate, fast objects break ties.
///
/// `0.9·e^(−0.01·d) + 0.1·|v|/max_speed`, `d` the miss distance of the
/// trajectory from the sensor.
pub fn priority(position: Vec3, velocity: Vec3, max_speed: f64) -> f64 {
    let miss_distance = distance_to_line(Vec3::ZERO, position, velocity);
    PRIORITY_PROXIMITY_WEIGHT * (-PRIORITY_DISTANCE_DECAY * miss_distance).exp()
        + PRIORITY_SPEED_WEIGHT * velocity.length() / max_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_round_trip() {
        // Object passes through a known point on the 10 km circle.
        let radius = 10_000.0;
        let angle: f64 = 1.0;
        let crossing = Vec3::new(radius * angle.cos(), radius * angle.sin(), 800.0);
        let velocity = Vec3::new(-0.3, -0.45, -0.02);
        let start = crossing - velocity * 20_000.0;

        let entry = entry_point(start, velocity, radius).expect("trajectory crosses the circle");
        assert!(
            entry.distance(crossing) < 1e-6,
            "entry {entry:?} should equal {crossing:?}"
        );
    }

    #[test]
    fn test_entry_point_picks_nearer_crossing() {
        // Flying south along x = 0 from far north: the north crossing comes first.
        let entry = entry_point(Vec3::new(0.0, 30_000.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 10_000.0)
            .unwrap();
        assert!((entry.y - 10_000.0).abs() < 1e-6, "got {entry:?}");
    }

    #[test]
    fn test_entry_point_misses() {
        let miss = entry_point(Vec3::new(-30_000.0, 15_000.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 10_000.0);
        assert_eq!(miss, None);

        let hover = entry_point(Vec3::new(0.0, 30_000.0, 0.0), Vec3::new(0.0, 0.0, 0.1), 10_000.0);
        assert_eq!(hover, None, "no horizontal motion means no crossing");
    }

    #[test]
    fn test_meeting_point_satisfies_equal_times() {
        let position = Vec3::new(4_000.0, 25_000.0, 1_500.0);
        let velocity = Vec3::new(-0.1, -0.6, 0.0);
        let speed = 1.2;

        let (point, t) = meeting_point(position, velocity, speed);
        assert!(t > 0.0 && t < MEET_SEARCH_HORIZON_MS);
        assert!(point.distance(position + velocity * t) < 1e-9);
        // Interceptor path length matches the meeting point distance.
        assert!(
            (speed * t - point.length()).abs() < 1e-6,
            "s*t = {}, |p| = {}",
            speed * t,
            point.length()
        );
    }

    #[test]
    fn test_meeting_point_head_on_closed_form() {
        // Straight at the origin: d - v*t = s*t.
        let (point, t) = meeting_point(Vec3::new(0.0, 12_000.0, 0.0), Vec3::new(0.0, -0.5, 0.0), 1.0);
        assert!((t - 8_000.0).abs() < 1e-6, "t = {t}");
        assert!((point.y - 8_000.0).abs() < 1e-5);
    }

    #[test]
    fn test_meeting_point_unreachable_returns_horizon() {
        let (_, t) = meeting_point(Vec3::new(0.0, 10_000.0, 0.0), Vec3::new(0.0, 2.0, 0.0), 1.0);
        assert!((t - MEET_SEARCH_HORIZON_MS).abs() < 1e-6);
    }

    #[test]
    fn test_priority_prefers_close_passes() {
        let direct = priority(Vec3::new(0.0, 20_000.0, 0.0), Vec3::new(0.0, -0.5, 0.0), 1.0);
        let offset = priority(Vec3::new(300.0, 20_000.0, 0.0), Vec3::new(0.0, -0.5, 0.0), 1.0);
        assert!((direct - (0.9 + 0.05)).abs() < 1e-9, "direct hit scores {direct}");
        assert!(offset < direct);
        assert!((offset - (0.9 * (-3.0f64).exp() + 0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_priority_stationary_object_uses_range() {
        let p = priority(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 1.0);
        assert!((p - 0.9 * (-1.0f64).exp()).abs() < 1e-9);
    }
}
