//! Controller engine: the per-tick control loop.
//!
//! `BeamController` owns the object registry, the simulation clock and the
//! actuators. Each `tick` ingests one batch of reports, refreshes
//! predictions, drops silent objects, schedules the beam, commits
//! interceptors and advances the actuators. Completely deterministic: the
//! same parameters and report sequence always give the same outputs.

use hecs::Entity;

use beamwarden_core::components::TrackedObject;
use beamwarden_core::error::ConfigResult;
use beamwarden_core::params::Params;
use beamwarden_core::reports::ReportBatch;
use beamwarden_core::state::{Diagnostics, InterceptCommit, TickOutput};
use beamwarden_core::types::SimTime;

use crate::estimator::AlphaBetaFilter;
use crate::kinematics::Actuator;
use crate::registry::Registry;
use crate::systems;
use crate::systems::scheduler::PlatformView;

/// The sensor controller. Owns every object and both actuators.
pub struct BeamController {
    params: Params,
    time: SimTime,
    registry: Registry,
    filter: AlphaBetaFilter,
    sensor: Actuator,
    platform: Option<Actuator>,
    followed: Vec<u32>,
    despawn_buffer: Vec<Entity>,
}

impl BeamController {
    /// Create a controller after validating `params`.
    pub fn new(params: Params) -> ConfigResult<Self> {
        params.validate()?;

        let sensor = Actuator::new(
            params.sensor.start_angle,
            params.sensor.max_angle_speed,
            params.sensor.max_eps,
        );
        let platform = params
            .platform
            .as_ref()
            .map(|p| Actuator::new(p.start_angle, p.max_angle_speed, p.max_eps));

        Ok(Self {
            filter: AlphaBetaFilter::new(params.tracking.filter_gain_ceiling),
            time: SimTime::default(),
            registry: Registry::new(),
            sensor,
            platform,
            followed: Vec::new(),
            despawn_buffer: Vec::new(),
            params,
        })
    }

    /// Advance the controller by `dt_ms` with the reports gathered since the
    /// previous tick.
    pub fn tick(&mut self, dt_ms: f64, batch: &ReportBatch) -> TickOutput {
        self.time.advance(dt_ms);
        let intercepts = self.run_systems(dt_ms, batch);
        systems::snapshot::build_output(
            &self.time,
            &self.sensor,
            self.platform.as_ref(),
            &self.followed,
            intercepts,
        )
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The narrow sensor actuator.
    pub fn sensor(&self) -> &Actuator {
        &self.sensor
    }

    /// The platform actuator, if one is configured.
    pub fn platform(&self) -> Option<&Actuator> {
        self.platform.as_ref()
    }

    /// Ids the sensor is currently aimed at.
    pub fn followed_ids(&self) -> &[u32] {
        &self.followed
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    /// Copy of one object's state.
    pub fn object(&self, id: u32) -> Option<TrackedObject> {
        self.registry.get(id).map(|obj| TrackedObject::clone(&obj))
    }

    /// Priorities, entry points and meeting points of every live object.
    pub fn diagnostics(&self) -> Diagnostics {
        systems::snapshot::build_diagnostics(&self.registry)
    }

    /// Run all systems in order; returns the interceptors committed.
    fn run_systems(&mut self, dt_ms: f64, batch: &ReportBatch) -> Vec<InterceptCommit> {
        let now = self.time.elapsed_ms;

        // 1. Merge reports into objects
        systems::ingest::run(&mut self.registry, batch, now, &self.params, &self.filter);
        // 2. Entry / near / meeting points and priority
        systems::prediction::run(&mut self.registry, &self.params, &self.sensor);
        // 3. Drop silent objects
        systems::cleanup::run(
            &mut self.registry,
            &mut self.followed,
            now,
            &mut self.despawn_buffer,
        );
        // 4. Beam scheduling
        let lists = systems::scheduler::partition(
            &self.registry.snapshot(),
            &self.params.sensor.responsible_sector,
        );
        let platform_view = match (&self.platform, &self.params.platform) {
            (Some(actuator), Some(p)) => Some(PlatformView {
                actuator,
                dead_zones: &p.dead_zones,
            }),
            _ => None,
        };
        let schedule = systems::scheduler::run(
            &lists,
            &self.followed,
            &self.sensor,
            platform_view,
            &self.params,
        );
        self.followed = schedule.followed;
        self.sensor.command = schedule.sensor_command;
        if let Some(platform) = self.platform.as_mut() {
            platform.command = schedule.platform_command;
        }
        // 5. Interceptor commitment
        let intercepts = systems::intercept::run(&mut self.registry, &self.followed, &self.params);
        // 6. Actuators
        systems::actuators::run(&mut self.sensor, self.platform.as_mut(), dt_ms);

        intercepts
    }
}
