use nalgebra::{Matrix3, Vector3};

use crate::errors::SimulationError;

/// Diagonal moment-of-inertia tensor of a multi-rotor airframe, modelled as a
/// spherical hub of radius r plus four point masses at arm length L (the
/// approximation from Beard, "Quadrotor Dynamics and Control").
///
/// Derived once at configuration time and constant afterwards; the body is
/// rigid and loses no mass.
#[derive(Debug, Clone)]
pub struct InertiaTensor {
    tensor: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl InertiaTensor {
    pub fn from_geometry(
        weight: f64,
        body_radius: f64,
        arm_length: f64,
    ) -> Result<Self, SimulationError> {
        if weight <= 0.0 || body_radius <= 0.0 || arm_length <= 0.0 {
            return Err(SimulationError::Configuration(format!(
                "weight, body radius and arm length must be positive, got weight = {} kg, \
                 body radius = {} m, arm length = {} m",
                weight, body_radius, arm_length
            )));
        }

        let hub = 2.0 * weight * body_radius.powi(2) / 5.0;
        let ixx = hub + 2.0 * weight * arm_length.powi(2);
        let izz = hub + 4.0 * weight * arm_length.powi(2);

        Ok(InertiaTensor {
            tensor: Matrix3::from_diagonal(&Vector3::new(ixx, ixx, izz)),
            inverse: Matrix3::from_diagonal(&Vector3::new(1.0 / ixx, 1.0 / ixx, 1.0 / izz)),
        })
    }

    pub fn tensor(&self) -> &Matrix3<f64> {
        &self.tensor
    }

    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }
}
