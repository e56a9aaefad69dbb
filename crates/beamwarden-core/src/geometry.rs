//! Geometry primitives shared by prediction and scheduling.
//!
//! Azimuths live on the linear interval returned by `atan2`; nothing here
//! wraps around ±π.

use serde::{Deserialize, Serialize};

use crate::constants::GEOMETRY_EPS;
use crate::types::Vec3;

/// Cylindrical projection of a point: horizontal radius, azimuth, height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylindrical {
    pub radius: f64,
    pub azimuth: f64,
    pub height: f64,
}

impl Cylindrical {
    pub fn from_cartesian(v: Vec3) -> Self {
        Self {
            radius: v.truncate().length(),
            azimuth: azimuth(v),
            height: v.z,
        }
    }

    pub fn to_cartesian(self) -> Vec3 {
        Vec3::new(
            self.radius * self.azimuth.cos(),
            self.radius * self.azimuth.sin(),
            self.height,
        )
    }
}

/// Azimuth of a point as seen from the origin (radians, counter-clockwise from +x).
pub fn azimuth(v: Vec3) -> f64 {
    v.y.atan2(v.x)
}

/// Distance between two points ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f64 {
    (a - b).truncate().length()
}

/// Perpendicular distance from `point` to the line through `line_point`
/// along `direction`. Degenerates to point distance for a zero direction.
pub fn distance_to_line(point: Vec3, line_point: Vec3, direction: Vec3) -> f64 {
    let len = direction.length();
    if len < GEOMETRY_EPS {
        return point.distance(line_point);
    }
    direction.cross(point - line_point).length() / len
}

/// Real roots of `a·x² + b·x + c = 0`, ascending.
/// Falls back to the linear solution when `a` vanishes.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < GEOMETRY_EPS {
        if b.abs() < GEOMETRY_EPS {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let disc = b * b - 4.0 * a * c;
    if disc < -GEOMETRY_EPS {
        return Vec::new();
    }
    if disc.abs() <= GEOMETRY_EPS {
        return vec![-b / (2.0 * a)];
    }

    let sq = disc.sqrt();
    let r1 = (-b - sq) / (2.0 * a);
    let r2 = (-b + sq) / (2.0 * a);
    if r1 <= r2 {
        vec![r1, r2]
    } else {
        vec![r2, r1]
    }
}

/// Horizontal intersections of the line through `point` along `direction`
/// with the circle of `radius` around the origin. Heights are zero.
///
/// Uses the implicit line form `a·x + b·y + c = 0` and the foot of the
/// perpendicular from the origin. Returns no points for a horizontal
/// direction of zero length.
pub fn circle_line_intersections(point: Vec3, direction: Vec3, radius: f64) -> Vec<Vec3> {
    let a = direction.y;
    let b = -direction.x;
    let norm_sq = a * a + b * b;
    if norm_sq < GEOMETRY_EPS * GEOMETRY_EPS {
        return Vec::new();
    }
    let c = -(a * point.x + b * point.y);

    // Foot of the perpendicular from the origin.
    let x0 = -a * c / norm_sq;
    let y0 = -b * c / norm_sq;

    let reach = radius * radius * norm_sq;
    if c * c > reach + GEOMETRY_EPS {
        return Vec::new();
    }
    if (c * c - reach).abs() <= GEOMETRY_EPS {
        return vec![Vec3::new(x0, y0, 0.0)];
    }

    let half_chord_sq = radius * radius - c * c / norm_sq;
    let mult = (half_chord_sq / norm_sq).sqrt();
    vec![
        Vec3::new(x0 + b * mult, y0 - a * mult, 0.0),
        Vec3::new(x0 - b * mult, y0 + a * mult, 0.0),
    ]
}

/// Smallest and largest value of a set of angles, `None` when empty.
pub fn angle_span(angles: &[f64]) -> Option<(f64, f64)> {
    let mut iter = angles.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a))))
}

/// Closed angular interval `[start, end]` in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Segment of width `width` centred on `center`.
    pub fn centered(center: f64, width: f64) -> Self {
        Self::new(center - width / 2.0, center + width / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, angle: f64) -> bool {
        self.start <= angle && angle <= self.end
    }

    pub fn contains_all(&self, angles: &[f64]) -> bool {
        angles.iter().all(|&a| self.contains(a))
    }

    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Pull both edges inward by `margin`; `None` if nothing is left.
    pub fn shrunk(&self, margin: f64) -> Option<Self> {
        let s = Self::new(self.start + margin, self.end - margin);
        s.is_valid().then_some(s)
    }

    /// Push both edges outward by `margin`.
    pub fn widened(&self, margin: f64) -> Self {
        Self::new(self.start - margin, self.end + margin)
    }
}

/// Translate every segment by `offset`.
pub fn shift_segments(segments: &[Segment], offset: f64) -> Vec<Segment> {
    segments.iter().map(|s| s.shifted(offset)).collect()
}

/// Complement of `segments` within `domain`, each gap shrunk by `margin`
/// on both sides. Gaps narrower than twice the margin are dropped.
pub fn invert_segments(segments: &[Segment], domain: Segment, margin: f64) -> Vec<Segment> {
    let mut sorted: Vec<Segment> = segments.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut gaps = Vec::new();
    let mut cursor = domain.start;
    for seg in &sorted {
        if seg.start > cursor {
            gaps.push(Segment::new(cursor, seg.start.min(domain.end)));
        }
        cursor = cursor.max(seg.end);
        if cursor >= domain.end {
            break;
        }
    }
    if cursor < domain.end {
        gaps.push(Segment::new(cursor, domain.end));
    }

    gaps.into_iter().filter_map(|g| g.shrunk(margin)).collect()
}

/// The first segment containing `angle`.
pub fn segment_containing(segments: &[Segment], angle: f64) -> Option<&Segment> {
    segments.iter().find(|s| s.contains(angle))
}

/// Whether any segment contains `angle`.
pub fn in_any_segment(segments: &[Segment], angle: f64) -> bool {
    segment_containing(segments, angle).is_some()
}
