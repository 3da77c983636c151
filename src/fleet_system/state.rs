use nalgebra::Vector3;

use crate::dynamics_system::frame::wrap_angle;

/// The 12 reals fully describing a rigid body at an instant: world-frame
/// position and linear velocity, roll/pitch/yaw, and body-frame angular
/// velocity, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleState {
    values: [f64; 12],
}

impl VehicleState {
    pub fn new(position: Vector3<f64>, orientation: Vector3<f64>) -> Self {
        let mut state = VehicleState { values: [0.0; 12] };
        state.set_position(position);
        state.set_orientation(orientation);
        state
    }

    pub fn from_array(values: [f64; 12]) -> Self {
        VehicleState { values }
    }

    pub fn as_array(&self) -> [f64; 12] {
        self.values
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.values[0], self.values[1], self.values[2])
    }

    pub fn linear_velocity(&self) -> Vector3<f64> {
        Vector3::new(self.values[3], self.values[4], self.values[5])
    }

    pub fn orientation(&self) -> Vector3<f64> {
        Vector3::new(self.values[6], self.values[7], self.values[8])
    }

    pub fn angular_velocity(&self) -> Vector3<f64> {
        Vector3::new(self.values[9], self.values[10], self.values[11])
    }

    pub fn set_position(&mut self, position: Vector3<f64>) {
        self.values[0] = position.x;
        self.values[1] = position.y;
        self.values[2] = position.z;
    }

    pub fn set_orientation(&mut self, orientation: Vector3<f64>) {
        self.values[6] = wrap_angle(orientation.x);
        self.values[7] = wrap_angle(orientation.y);
        self.values[8] = wrap_angle(orientation.z);
    }

    /// Folds the attitude angles back into (−π, π]; applied after every
    /// integration step so the orientation invariant holds continuously.
    pub fn wrap_orientation(&mut self) {
        self.values[6] = wrap_angle(self.values[6]);
        self.values[7] = wrap_angle(self.values[7]);
        self.values[8] = wrap_angle(self.values[8]);
    }

    /// Keeps the vehicle on or above the floor.
    pub fn clamp_to_ground(&mut self) {
        self.values[2] = self.values[2].max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_new_state_partitions() {
        let state = VehicleState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(state.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(state.orientation(), Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(state.linear_velocity(), Vector3::zeros());
        assert_eq!(state.angular_velocity(), Vector3::zeros());
    }

    #[test]
    fn test_orientation_setter_wraps() {
        let mut state = VehicleState::default();
        state.set_orientation(Vector3::new(3.0 * PI, -PI, 0.5));
        let orientation = state.orientation();
        assert_abs_diff_eq!(orientation.x, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(orientation.y, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(orientation.z, 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_ground_clamp() {
        let mut state = VehicleState::new(Vector3::new(0.0, 0.0, -0.4), Vector3::zeros());
        state.clamp_to_ground();
        assert_eq!(state.position().z, 0.0);

        let mut airborne = VehicleState::new(Vector3::new(0.0, 0.0, 1.7), Vector3::zeros());
        airborne.clamp_to_ground();
        assert_eq!(airborne.position().z, 1.7);
    }

    #[test]
    fn test_array_round_trip_preserves_layout() {
        let mut values = [0.0; 12];
        values[5] = -3.5;
        values[8] = 0.9;
        let state = VehicleState::from_array(values);
        assert_eq!(state.linear_velocity().z, -3.5);
        assert_eq!(state.orientation().z, 0.9);
        assert_eq!(state.as_array(), values);
    }
}
