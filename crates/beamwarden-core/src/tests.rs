#[cfg(test)]
mod tests {
    use crate::components::{PredictionFlags, Thresholds, TrackedObject};
    use crate::error::ConfigError;
    use crate::geometry::Segment;
    use crate::params::{Params, PlatformParams};
    use crate::reports::{ReportBatch, WideSourceReport};
    use crate::state::{InterceptCommit, TickOutput};
    use crate::types::{SimTime, Vec3};

    fn object() -> TrackedObject {
        TrackedObject {
            id: 7,
            preset_priority: None,
            priority: None,
            position: Vec3::new(0.0, 20_000.0, 1_000.0),
            filtered_speed: Vec3::new(0.0, -0.4, 0.0),
            raw_position: None,
            wide_position: None,
            wide_speed: Vec3::new(0.0, -0.5, 0.0),
            entry_point: None,
            near_point: None,
            meet_point: None,
            wide_count: 1,
            narrow_count: 0,
            thresholds: Thresholds {
                wide: 1,
                narrow: 10,
                approx_narrow: 3,
            },
            needs: PredictionFlags::default(),
            intercept_committed: false,
            last_update_ms: 100.0,
            last_narrow_ms: 0.0,
            death_timeout_ms: 1_000.0,
        }
    }

    // ---- Params ----

    #[test]
    fn test_default_params_validate() {
        Params::default().validate().unwrap();
    }

    #[test]
    fn test_params_partial_json_uses_defaults() {
        let json = r#"{
            "sensor": { "radius": 5000.0 },
            "platform": { "dead_zones": [ { "start": -0.5, "end": 0.5 } ] }
        }"#;
        let params = Params::from_json_str(json).unwrap();
        assert_eq!(params.sensor.radius, 5000.0);
        assert_eq!(params.tracking, Params::default().tracking);
        let platform = params.platform.expect("platform section present");
        assert_eq!(platform.dead_zones, vec![Segment::new(-0.5, 0.5)]);
        assert_eq!(platform.max_eps, PlatformParams::default().max_eps);
    }

    #[test]
    fn test_params_serde_round_trip() {
        let mut params = Params::default();
        params.platform = Some(PlatformParams::default());
        let json = serde_json::to_string(&params).unwrap();
        let back = Params::from_json_str(&json).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn test_params_reject_bad_values() {
        let mut params = Params::default();
        params.sensor.max_eps = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositive { field: "sensor.max_eps", .. })
        ));

        let mut params = Params::default();
        params.scheduling.margin_angle = params.sensor.view_angle;
        assert!(matches!(params.validate(), Err(ConfigError::ViewTooNarrow { .. })));

        let mut params = Params::default();
        params.tracking.approx_narrow_threshold = params.tracking.narrow_threshold + 1;
        assert!(matches!(params.validate(), Err(ConfigError::ThresholdOrder { .. })));

        let mut params = Params::default();
        params.platform = Some(PlatformParams {
            dead_zones: vec![Segment::new(1.0, 0.5)],
            ..PlatformParams::default()
        });
        assert!(matches!(params.validate(), Err(ConfigError::InvertedSegment { .. })));
    }

    #[test]
    fn test_params_parse_error_is_reported() {
        let err = Params::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse parameters"));
    }

    #[test]
    fn test_derived_params() {
        let params = Params::default();
        assert!((params.near_radius() - params.sensor.radius * 0.5).abs() < 1e-9);
        // 100 Hz: 20 samples take 200 ms.
        assert!((params.sampling_time_ms(20) - 200.0).abs() < 1e-9);
        assert!(params.window_width() > 0.0);
    }

    // ---- TrackedObject ----

    #[test]
    fn test_velocity_switches_to_filter_after_approx_threshold() {
        let mut obj = object();
        assert_eq!(obj.velocity(), obj.wide_speed);
        obj.narrow_count = 3;
        assert_eq!(obj.velocity(), obj.filtered_speed);
    }

    #[test]
    fn test_launch_readiness_and_missing_samples() {
        let mut obj = object();
        obj.narrow_count = 4;
        assert!(!obj.is_launch_ready());
        assert_eq!(obj.samples_to_precise(), 6);
        obj.narrow_count = 12;
        assert!(obj.is_launch_ready());
        assert_eq!(obj.samples_to_precise(), 0);
    }

    #[test]
    fn test_death_is_inclusive_of_timeout() {
        let obj = object();
        assert!(!obj.is_dead(1_099.0));
        assert!(obj.is_dead(1_100.0));
    }

    #[test]
    fn test_required_angles_fallbacks() {
        let mut obj = object();
        let pos_angle = obj.position_angle();
        assert_eq!(obj.required_angles(), vec![pos_angle]);

        obj.entry_point = Some(Vec3::new(-10_000.0, 0.0, 0.0));
        obj.meet_point = Some(Vec3::new(0.0, 5_000.0, 0.0));
        let angles = obj.required_angles();
        assert_eq!(angles.len(), 2);
        assert!((angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-12, "meet angle first");
        assert!((angles[1] - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_times_to_points() {
        let mut obj = object();
        assert_eq!(obj.time_to_meet(), None);
        obj.meet_point = Some(Vec3::new(0.0, 10_000.0, 1_000.0));
        obj.entry_point = Some(Vec3::new(0.0, 10_000.0, 0.0));
        // Wide speed 0.5 m/ms over 10 km.
        assert!((obj.time_to_meet().unwrap() - 20_000.0).abs() < 1e-6);
        assert!((obj.time_to_entry().unwrap() - 20_000.0).abs() < 1e-6);

        obj.wide_speed = Vec3::ZERO;
        assert!(obj.time_to_meet().unwrap().is_infinite());
    }

    // ---- Reports / output ----

    #[test]
    fn test_wide_report_preset_priority_optional() {
        let json = r#"{ "id": 3, "position": [1.0, 2.0, 3.0], "velocity": [0.0, 0.0, 0.0] }"#;
        let report: WideSourceReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.preset_priority, None);
        assert_eq!(report.position, Vec3::new(1.0, 2.0, 3.0));

        let batch: ReportBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_tick_output_serializes() {
        let mut time = SimTime::default();
        time.advance(10.0);
        let output = TickOutput {
            time,
            sensor_angle: 1.0,
            platform_angle: None,
            followed_ids: vec![4, 2],
            intercepts: vec![InterceptCommit {
                object_id: 4,
                point: Vec3::new(1.0, 2.0, 3.0),
            }],
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: TickOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, back);
        assert_eq!(back.time.tick, 1);
    }
}
