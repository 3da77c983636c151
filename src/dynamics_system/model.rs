use nalgebra::Vector3;

use crate::dynamics_system::frame::rotation_matrix;
use crate::fleet_system::vehicle::VehicleConfig;

/// Equations of motion for one rotor topology.
///
/// The kinematics, the thrust projection and Euler's rigid-body equation are
/// shared by every topology; implementations only supply the rotor count and
/// the rule that assembles net body torque from the individual thrusts.
pub trait DynamicsModel: Send + Sync {
    fn rotor_count(&self) -> usize;

    /// Net body-frame torque produced by the given per-rotor thrusts (N).
    fn torque(&self, config: &VehicleConfig, thrusts: &[f64]) -> Vector3<f64>;

    /// Right-hand side of the equations of motion. A pure function of the
    /// passed state; the dynamics are time-invariant, so no time argument.
    ///
    /// State layout: [0:3) world position, [3:6) world velocity,
    /// [6:9) roll/pitch/yaw, [9:12) body angular velocity.
    fn derivative(&self, state: &[f64; 12], config: &VehicleConfig, thrusts: &[f64]) -> [f64; 12] {
        let mut derivative = [0.0; 12];

        // Kinematic identities: position follows velocity, attitude follows
        // the angular rates.
        derivative[0] = state[3];
        derivative[1] = state[4];
        derivative[2] = state[5];
        derivative[6] = state[9];
        derivative[7] = state[10];
        derivative[8] = state[11];

        // Total thrust acts along the body z-axis, rotated into the world
        // frame; gravity pulls along the world vertical.
        let total_thrust: f64 = thrusts.iter().sum();
        let rotation = rotation_matrix(state[6], state[7], state[8]);
        let acceleration = Vector3::new(0.0, 0.0, -config.gravity)
            + rotation * Vector3::new(0.0, 0.0, total_thrust) / config.weight;
        derivative[3] = acceleration.x;
        derivative[4] = acceleration.y;
        derivative[5] = acceleration.z;

        // Euler's rigid-body equation in the body frame. The gyroscopic cross
        // term is required for angular-momentum conservation whenever the
        // inertia is not spherical.
        let omega = Vector3::new(state[9], state[10], state[11]);
        let torque = self.torque(config, thrusts);
        let omega_dot =
            config.inertia.inverse() * (torque - omega.cross(&(config.inertia.tensor() * omega)));
        derivative[9] = omega_dot.x;
        derivative[10] = omega_dot.y;
        derivative[11] = omega_dot.z;

        derivative
    }
}

/// Four-rotor "+" layout: rotor 1 sits on the +y arm, rotor 2 on +x, rotor 3
/// on -y and rotor 4 on -x. Rotors 1/3 spin opposite to 2/4, so their drag
/// reaction torques alternate sign around the yaw axis.
pub struct Quadcopter;

impl DynamicsModel for Quadcopter {
    fn rotor_count(&self) -> usize {
        4
    }

    fn torque(&self, config: &VehicleConfig, thrusts: &[f64]) -> Vector3<f64> {
        debug_assert_eq!(
            thrusts.len(),
            self.rotor_count(),
            "quadcopter torque needs one thrust per rotor"
        );
        Vector3::new(
            config.arm_length * (thrusts[0] - thrusts[2]),
            config.arm_length * (thrusts[1] - thrusts[3]),
            config.drag_coupling * (thrusts[0] - thrusts[1] + thrusts[2] - thrusts[3]),
        )
    }
}
