//! Bounded-acceleration rotation of the sensor and its platform.
//!
//! Both actuators are driven by the same law: steer the angular speed toward
//! the fastest speed from which the actuator can still stop on target,
//! never changing speed by more than `max_eps · dt` per step and never
//! exceeding the commanded cruising speed.

use beamwarden_core::constants::{ARRIVAL_ANGLE_EPS, ARRIVAL_SPEED_FACTOR};
use beamwarden_core::geometry::solve_quadratic;
use beamwarden_core::types::{ActuatorState, CommandedState};

fn is_arrived(distance: f64, speed: f64, max_eps: f64) -> bool {
    distance.abs() < ARRIVAL_ANGLE_EPS && speed.abs() < max_eps * ARRIVAL_SPEED_FACTOR
}

/// Minimum time (ms) to bring `current` to rest at `target_angle`.
///
/// Braking comes first when the actuator moves away from the target or
/// cannot stop before it. The remaining leg is a trapezoidal profile when
/// cruising speed is reachable and a triangular one otherwise.
pub fn time_to_rotate(
    current: ActuatorState,
    target_angle: f64,
    cruise_speed: f64,
    max_eps: f64,
) -> f64 {
    let mut angle = current.angle;
    let mut speed = current.angular_speed;
    let distance = target_angle - angle;

    if is_arrived(distance, speed, max_eps) {
        return 0.0;
    }

    let mut time = 0.0;
    let stopping_distance = speed * speed / (2.0 * max_eps);
    if speed * distance < 0.0 || distance.abs() < stopping_distance {
        time += speed.abs() / max_eps;
        angle += speed.signum() * stopping_distance;
        speed = 0.0;
    }

    let remaining = (target_angle - angle).abs();
    let v0 = speed.abs().min(cruise_speed);
    let accel_distance = (cruise_speed * cruise_speed - v0 * v0) / (2.0 * max_eps);
    let decel_distance = cruise_speed * cruise_speed / (2.0 * max_eps);

    if accel_distance + decel_distance <= remaining {
        let cruise_distance = remaining - accel_distance - decel_distance;
        time += (2.0 * cruise_speed - v0) / max_eps + cruise_distance / cruise_speed;
    } else {
        // Peak reached after t: max_eps·t² + 2·v0·t + v0²/(2·max_eps) = remaining,
        // divided through by max_eps to keep the coefficients well scaled.
        let roots = solve_quadratic(
            1.0,
            2.0 * v0 / max_eps,
            0.5 * v0 * v0 / (max_eps * max_eps) - remaining / max_eps,
        );
        let t = roots.last().copied().unwrap_or(0.0).max(0.0);
        time += 2.0 * t + v0 / max_eps;
    }

    time
}

/// Slow `speed` toward zero by at most `max_dv` without reversing it.
fn brake(speed: f64, max_dv: f64) -> f64 {
    if speed.abs() <= max_dv {
        0.0
    } else {
        speed - speed.signum() * max_dv
    }
}

fn asap_speed(distance: f64, speed: f64, cruise_speed: f64, max_eps: f64, dt: f64) -> f64 {
    let max_dv = max_eps * dt;
    if speed * distance < 0.0 {
        return brake(speed, max_dv);
    }
    let allowed = cruise_speed.min((2.0 * max_eps * distance.abs()).sqrt());
    let desired = distance.signum() * allowed;
    speed + (desired - speed).clamp(-max_dv, max_dv)
}

fn deadline_speed(distance: f64, speed: f64, time_left: f64, max_eps: f64, dt: f64) -> f64 {
    if speed * distance < 0.0 || (speed * time_left).abs() > distance.abs() {
        return brake(speed, max_eps * dt);
    }
    let eps = (2.0 * (distance - speed * time_left) / (time_left * time_left)).clamp(-max_eps, max_eps);
    speed + eps * dt
}

/// Advance an actuator by `dt` ms toward `command`.
///
/// Without a deadline the actuator moves as fast as its limits allow. With
/// one it applies the constant acceleration that covers the remaining
/// distance exactly at the deadline; an expired deadline falls back to the
/// as-fast-as-possible law. Within `ARRIVAL_ANGLE_EPS` of the target at low
/// speed the actuator snaps onto it and stops.
pub fn step(current: ActuatorState, command: &CommandedState, max_eps: f64, dt: f64) -> ActuatorState {
    let distance = command.angle - current.angle;
    let speed = current.angular_speed;

    let new_speed = match command.time_to_reach_ms {
        Some(time_left) if time_left > 0.0 => deadline_speed(distance, speed, time_left, max_eps, dt),
        _ => asap_speed(distance, speed, command.cruise_speed, max_eps, dt),
    }
    .clamp(-command.cruise_speed, command.cruise_speed);

    let angle = current.angle + new_speed * dt;
    if is_arrived(command.angle - angle, new_speed, max_eps) {
        return ActuatorState::at_rest(command.angle);
    }

    ActuatorState {
        angle,
        angular_speed: new_speed,
    }
}

/// A rotating actuator: live state, drive limits and the current command.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub state: ActuatorState,
    pub command: Option<CommandedState>,
    pub max_speed: f64,
    pub max_eps: f64,
}

impl Actuator {
    pub fn new(start_angle: f64, max_speed: f64, max_eps: f64) -> Self {
        Self {
            state: ActuatorState::at_rest(start_angle),
            command: None,
            max_speed,
            max_eps,
        }
    }

    /// Angle the actuator is heading for: the commanded one, or where it is.
    pub fn reference_angle(&self) -> f64 {
        self.command.map_or(self.state.angle, |c| c.angle)
    }

    /// Fastest rotation time onto `target_angle` at full cruising speed.
    pub fn time_to_rotate(&self, target_angle: f64) -> f64 {
        time_to_rotate(self.state, target_angle, self.max_speed, self.max_eps)
    }

    /// Command an as-soon-as-possible rotation to `angle` at full speed.
    pub fn command_asap(&self, angle: f64) -> CommandedState {
        CommandedState::asap(angle, self.max_speed)
    }

    /// Step toward the command; returns the angle turned. Idle without one.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let Some(command) = self.command else {
            return 0.0;
        };
        let before = self.state.angle;
        self.state = step(self.state, &command, self.max_eps, dt);
        self.state.angle - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRUISE: f64 = 1e-3;
    const EPS: f64 = 1e-6;

    /// Step until arrival; returns elapsed ms. Checks speed and
    /// acceleration limits on every step before the final snap.
    fn run_to_arrival(start: ActuatorState, command: CommandedState, dt: f64, limit_ms: f64) -> f64 {
        let mut state = start;
        let mut elapsed = 0.0;
        let mut cmd = command;
        while elapsed < limit_ms {
            let next = step(state, &cmd, EPS, dt);
            elapsed += dt;
            if next == ActuatorState::at_rest(cmd.angle) {
                return elapsed;
            }
            assert!(
                next.angular_speed.abs() <= cmd.cruise_speed + 1e-15,
                "speed {} exceeds cruise at {elapsed} ms",
                next.angular_speed
            );
            assert!(
                (next.angular_speed - state.angular_speed).abs() <= EPS * dt + 1e-15,
                "acceleration limit violated at {elapsed} ms"
            );
            state = next;
            if let Some(t) = cmd.time_to_reach_ms.as_mut() {
                *t -= dt;
            }
        }
        panic!("actuator did not arrive within {limit_ms} ms, state {state:?}");
    }

    #[test]
    fn test_time_to_rotate_at_target_is_zero() {
        let t = time_to_rotate(ActuatorState::at_rest(1.0), 1.0 + 5e-4, CRUISE, EPS);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_time_to_rotate_trapezoid() {
        // 1.0 rad spent accelerating and braking, 0.5 rad cruising.
        let t = time_to_rotate(ActuatorState::at_rest(0.0), 1.5, CRUISE, EPS);
        assert!((t - 2_500.0).abs() < 1e-6, "got {t}");
    }

    #[test]
    fn test_time_to_rotate_triangle() {
        let t = time_to_rotate(ActuatorState::at_rest(0.0), -0.5, CRUISE, EPS);
        let expected = 2.0 * (0.5 / EPS).sqrt();
        assert!((t - expected).abs() < 1e-6, "got {t}, expected {expected}");
    }

    #[test]
    fn test_time_to_rotate_brakes_when_moving_away() {
        let current = ActuatorState {
            angle: 0.0,
            angular_speed: -5e-4,
        };
        // 500 ms braking (0.125 rad lost), then a 1.125 rad trapezoid.
        let t = time_to_rotate(current, 1.0, CRUISE, EPS);
        assert!((t - 2_625.0).abs() < 1e-6, "got {t}");
    }

    #[test]
    fn test_step_converges_within_predicted_time() {
        for &(start, target) in &[(0.0, 1.5), (0.2, 0.5), (1.0, -0.4), (2.0, 1.98)] {
            let from = ActuatorState::at_rest(start);
            let predicted = time_to_rotate(from, target, CRUISE, EPS);
            let elapsed = run_to_arrival(from, CommandedState::asap(target, CRUISE), 1.0, 10_000.0);
            assert!(
                elapsed <= predicted * 1.02 + 1.0,
                "{start} -> {target}: took {elapsed} ms, predicted {predicted} ms"
            );
        }
    }

    #[test]
    fn test_step_reverses_when_moving_away() {
        let from = ActuatorState {
            angle: 0.0,
            angular_speed: -5e-4,
        };
        let elapsed = run_to_arrival(from, CommandedState::asap(1.0, CRUISE), 1.0, 10_000.0);
        assert!(elapsed <= 2_625.0 * 1.02 + 1.0, "took {elapsed} ms");
    }

    #[test]
    fn test_step_holds_at_target() {
        let at = ActuatorState::at_rest(0.7);
        assert_eq!(step(at, &CommandedState::asap(0.7, CRUISE), EPS, 10.0), at);
    }

    #[test]
    fn test_deadline_mode_takes_its_time() {
        let from = ActuatorState::at_rest(0.0);
        let command = CommandedState {
            angle: 0.5,
            cruise_speed: CRUISE,
            time_to_reach_ms: Some(4_000.0),
        };

        // Halfway through the budget it has covered about a quarter.
        let mut state = from;
        let mut cmd = command;
        for _ in 0..200 {
            state = step(state, &cmd, EPS, 10.0);
            if let Some(t) = cmd.time_to_reach_ms.as_mut() {
                *t -= 10.0;
            }
        }
        assert!(
            state.angle > 0.1 && state.angle < 0.2,
            "deadline mode at 2 s: angle {}",
            state.angle
        );

        let elapsed = run_to_arrival(from, command, 10.0, 10_000.0);
        assert!(elapsed > 3_500.0 && elapsed <= 4_100.0, "arrived after {elapsed} ms");
    }

    #[test]
    fn test_actuator_idle_without_command() {
        let mut actuator = Actuator::new(0.3, CRUISE, EPS);
        assert_eq!(actuator.advance(10.0), 0.0);
        assert_eq!(actuator.reference_angle(), 0.3);

        actuator.command = Some(actuator.command_asap(0.8));
        assert_eq!(actuator.reference_angle(), 0.8);
        let turned = actuator.advance(10.0);
        assert!(turned > 0.0 && turned <= EPS * 10.0 * 10.0 + 1e-15);
    }
}
