//! Actuator system: advances the platform and the sensor it carries.

use crate::kinematics::Actuator;

/// Step both actuators by `dt_ms`. The platform turns first and carries
/// the sensor with it; the sensor then steps toward its own command.
pub fn run(sensor: &mut Actuator, platform: Option<&mut Actuator>, dt_ms: f64) {
    if let Some(platform) = platform {
        let turned = platform.advance(dt_ms);
        sensor.state.angle += turned;
    }
    sensor.advance(dt_ms);
}
