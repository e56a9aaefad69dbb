//! Numeric tolerances and tuning constants.

// --- Geometry ---

/// Tolerance for degenerate-geometry checks (tangency, parallel lines).
pub const GEOMETRY_EPS: f64 = 1e-9;

/// Fraction of the sensor radius that defines the near (urgent) zone.
pub const NEAR_RADIUS_FACTOR: f64 = 0.5;

// --- Estimation ---

/// Sample index ceiling for the alpha-beta gain schedule.
/// Above it the filter runs with fixed gains.
pub const FILTER_GAIN_CEILING: u32 = 50;

// --- Prediction ---

/// Upper bound of the meeting-point time search (ms).
pub const MEET_SEARCH_HORIZON_MS: f64 = 1e5;

/// Convergence tolerance of the meeting-point time search (ms).
pub const MEET_SEARCH_TOLERANCE_MS: f64 = 1e-7;

/// Weight of trajectory proximity in the priority score.
pub const PRIORITY_PROXIMITY_WEIGHT: f64 = 0.9;

/// Weight of object speed in the priority score.
pub const PRIORITY_SPEED_WEIGHT: f64 = 0.1;

/// Decay rate of the proximity term per meter of miss distance.
pub const PRIORITY_DISTANCE_DECAY: f64 = 0.01;

// --- Kinematics ---

/// Angular distance under which an actuator counts as arrived (radians).
pub const ARRIVAL_ANGLE_EPS: f64 = 1e-3;

/// An actuator counts as stopped below `max_eps * ARRIVAL_SPEED_FACTOR`.
pub const ARRIVAL_SPEED_FACTOR: f64 = 400.0;

// --- Defaults ---

/// Default narrow sensor coverage radius (meters).
pub const DEFAULT_SENSOR_RADIUS: f64 = 10_000.0;

/// Default beam width (radians, 60 degrees).
pub const DEFAULT_VIEW_ANGLE: f64 = std::f64::consts::FRAC_PI_3;

/// Default sensor slew limit (radians per millisecond, 1 rad/s).
pub const DEFAULT_SENSOR_MAX_SPEED: f64 = 1e-3;

/// Default sensor acceleration limit (radians per ms², 1 rad/s²).
pub const DEFAULT_SENSOR_MAX_EPS: f64 = 1e-6;

/// Default narrow-source sampling frequency (Hz).
pub const DEFAULT_NARROW_FREQUENCY_HZ: f64 = 100.0;

/// Default angular margin kept inside each beam edge (radians, 5 degrees).
pub const DEFAULT_MARGIN_ANGLE: f64 = 5.0 * std::f64::consts::PI / 180.0;

/// Default slack added to scheduling deadlines (ms).
pub const DEFAULT_MARGIN_TIME_MS: f64 = 500.0;

/// Default fastest object the priority score normalizes against (m/ms).
pub const DEFAULT_MAX_TARGET_SPEED: f64 = 0.7;

/// Default silence after which an object is dropped (ms).
pub const DEFAULT_DEATH_TIMEOUT_MS: f64 = 3_000.0;

/// Default delay between commitment and interceptor launch (ms).
pub const DEFAULT_LAUNCH_DELAY_MS: f64 = 1_000.0;

/// Default interceptor speed (m/ms).
pub const DEFAULT_INTERCEPTOR_SPEED: f64 = 1.0;
