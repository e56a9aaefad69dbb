//! Controller parameters.
//!
//! All angles are radians, all times milliseconds, all speeds per
//! millisecond. Parameters load from JSON with every field optional;
//! missing fields fall back to the defaults in [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Segment;

/// Narrow sensor geometry and drive limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorParams {
    /// Coverage radius (meters, horizontal).
    pub radius: f64,
    /// Near zone radius as a fraction of `radius`.
    pub near_radius_factor: f64,
    /// Full beam width.
    pub view_angle: f64,
    pub max_angle_speed: f64,
    pub max_eps: f64,
    /// Narrow-source sampling frequency (Hz).
    pub frequency_hz: f64,
    pub start_angle: f64,
    /// Azimuths whose meeting points this sensor must defend.
    pub responsible_sector: Segment,
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SENSOR_RADIUS,
            near_radius_factor: NEAR_RADIUS_FACTOR,
            view_angle: DEFAULT_VIEW_ANGLE,
            max_angle_speed: DEFAULT_SENSOR_MAX_SPEED,
            max_eps: DEFAULT_SENSOR_MAX_EPS,
            frequency_hz: DEFAULT_NARROW_FREQUENCY_HZ,
            start_angle: std::f64::consts::FRAC_PI_2,
            responsible_sector: Segment::new(
                std::f64::consts::FRAC_PI_4,
                3.0 * std::f64::consts::FRAC_PI_4,
            ),
        }
    }
}

/// Measurement confidence thresholds and object lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingParams {
    /// Wide reports before an object's predictions are forced to refresh.
    pub wide_threshold: u32,
    /// Narrow samples before velocity counts as precise (launch-ready).
    pub narrow_threshold: u32,
    /// Narrow samples before the filtered velocity replaces the wide one.
    pub approx_narrow_threshold: u32,
    pub death_timeout_ms: f64,
    pub filter_gain_ceiling: u32,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            wide_threshold: 1,
            narrow_threshold: 20,
            approx_narrow_threshold: 5,
            death_timeout_ms: DEFAULT_DEATH_TIMEOUT_MS,
            filter_gain_ceiling: FILTER_GAIN_CEILING,
        }
    }
}

/// Defensive interceptor characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorParams {
    pub launch_delay_ms: f64,
    /// Flight speed (m/ms).
    pub speed: f64,
}

impl Default for InterceptorParams {
    fn default() -> Self {
        Self {
            launch_delay_ms: DEFAULT_LAUNCH_DELAY_MS,
            speed: DEFAULT_INTERCEPTOR_SPEED,
        }
    }
}

/// Scheduling margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingParams {
    /// Angle kept free inside each beam edge.
    pub margin_angle: f64,
    /// Slack added to rotation deadlines.
    pub margin_time_ms: f64,
    /// Speed the priority score normalizes against (m/ms).
    pub max_target_speed: f64,
}

impl Default for SchedulingParams {
    fn default() -> Self {
        Self {
            margin_angle: DEFAULT_MARGIN_ANGLE,
            margin_time_ms: DEFAULT_MARGIN_TIME_MS,
            max_target_speed: DEFAULT_MAX_TARGET_SPEED,
        }
    }
}

/// Secondary rotating platform carrying the sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformParams {
    pub max_angle_speed: f64,
    pub max_eps: f64,
    pub start_angle: f64,
    /// Blind zones relative to the platform heading.
    pub dead_zones: Vec<Segment>,
}

impl Default for PlatformParams {
    fn default() -> Self {
        Self {
            max_angle_speed: DEFAULT_SENSOR_MAX_SPEED / 4.0,
            max_eps: DEFAULT_SENSOR_MAX_EPS / 4.0,
            start_angle: 0.0,
            dead_zones: Vec::new(),
        }
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub sensor: SensorParams,
    pub tracking: TrackingParams,
    pub interceptor: InterceptorParams,
    pub scheduling: SchedulingParams,
    pub platform: Option<PlatformParams>,
}

impl Params {
    /// Parse and validate parameters from JSON.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Near zone radius in meters.
    pub fn near_radius(&self) -> f64 {
        self.sensor.radius * self.sensor.near_radius_factor
    }

    /// Widest angular span a single beam position can serve with margins.
    pub fn window_width(&self) -> f64 {
        self.sensor.view_angle - 2.0 * self.scheduling.margin_angle
    }

    /// Time the narrow source needs to collect `samples` measurements (ms).
    pub fn sampling_time_ms(&self, samples: u32) -> f64 {
        samples as f64 / self.sensor.frequency_hz * 1000.0
    }

    /// Reject parameter sets the controller cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        let positives = [
            ("sensor.radius", self.sensor.radius),
            ("sensor.near_radius_factor", self.sensor.near_radius_factor),
            ("sensor.view_angle", self.sensor.view_angle),
            ("sensor.max_angle_speed", self.sensor.max_angle_speed),
            ("sensor.max_eps", self.sensor.max_eps),
            ("sensor.frequency_hz", self.sensor.frequency_hz),
            ("tracking.death_timeout_ms", self.tracking.death_timeout_ms),
            ("interceptor.speed", self.interceptor.speed),
            ("scheduling.max_target_speed", self.scheduling.max_target_speed),
        ];
        for (field, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.window_width() <= 0.0 {
            return Err(ConfigError::ViewTooNarrow {
                view: self.sensor.view_angle,
                margin: self.scheduling.margin_angle,
            });
        }

        if self.tracking.approx_narrow_threshold > self.tracking.narrow_threshold {
            return Err(ConfigError::ThresholdOrder {
                approx: self.tracking.approx_narrow_threshold,
                narrow: self.tracking.narrow_threshold,
            });
        }

        if self.tracking.filter_gain_ceiling < 2 {
            return Err(ConfigError::GainCeiling);
        }

        check_segment("sensor.responsible_sector", &self.sensor.responsible_sector)?;

        if let Some(platform) = &self.platform {
            if platform.max_angle_speed.is_nan() || platform.max_angle_speed <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "platform.max_angle_speed",
                    value: platform.max_angle_speed,
                });
            }
            if platform.max_eps.is_nan() || platform.max_eps <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "platform.max_eps",
                    value: platform.max_eps,
                });
            }
            for zone in &platform.dead_zones {
                check_segment("platform.dead_zones", zone)?;
            }
        }

        Ok(())
    }
}

fn check_segment(name: &'static str, segment: &Segment) -> ConfigResult<()> {
    if segment.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvertedSegment {
            name,
            start: segment.start,
            end: segment.end,
        })
    }
}
