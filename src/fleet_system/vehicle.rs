use nalgebra::Vector3;

use crate::constants::{DRAG_COUPLING_COEFFICIENT, GRAVITY};
use crate::dynamics_system::inertia::InertiaTensor;
use crate::dynamics_system::integrator;
use crate::dynamics_system::model::{DynamicsModel, Quadcopter};
use crate::errors::SimulationError;
use crate::rotor_system::propeller::Propeller;

use super::state::VehicleState;

/// Caller-facing description of one vehicle, validated into a `Vehicle` at
/// fleet construction. Geometry is metric except the propeller dimensions,
/// which stay in the inches the thrust fit expects.
#[derive(Debug, Clone)]
pub struct VehicleSpec {
    pub position: Vector3<f64>,
    pub orientation: Vector3<f64>,
    pub weight: f64,             // kg
    pub arm_length: f64,         // m
    pub body_radius: f64,        // m
    pub gravity: f64,            // m/s²
    pub drag_coupling: f64,      // N·m per N
    pub propeller_diameter: f64, // in
    pub propeller_pitch: f64,    // in
}

impl VehicleSpec {
    /// A quadcopter under standard gravity with the usual drag coupling.
    pub fn quadcopter(
        position: Vector3<f64>,
        orientation: Vector3<f64>,
        weight: f64,
        arm_length: f64,
        body_radius: f64,
        propeller_diameter: f64,
        propeller_pitch: f64,
    ) -> Self {
        VehicleSpec {
            position,
            orientation,
            weight,
            arm_length,
            body_radius,
            gravity: GRAVITY,
            drag_coupling: DRAG_COUPLING_COEFFICIENT,
            propeller_diameter,
            propeller_pitch,
        }
    }
}

/// Validated physical parameters of one vehicle. The inertia tensor is
/// derived here exactly once; the body is rigid, so nothing in this struct
/// changes during a run.
#[derive(Debug, Clone)]
pub struct VehicleConfig {
    pub weight: f64,
    pub arm_length: f64,
    pub gravity: f64,
    pub drag_coupling: f64,
    pub inertia: InertiaTensor,
}

/// One simulated airframe: its parameters, its 12-dimensional state, one
/// propeller per rotor and the dynamics model for its rotor topology.
pub struct Vehicle {
    name: String,
    config: VehicleConfig,
    state: VehicleState,
    rotors: Vec<Propeller>,
    model: Box<dyn DynamicsModel>,
    diverged: bool,
}

impl Vehicle {
    pub fn new(name: &str, spec: &VehicleSpec) -> Result<Self, SimulationError> {
        let inertia = InertiaTensor::from_geometry(spec.weight, spec.body_radius, spec.arm_length)?;
        let model: Box<dyn DynamicsModel> = Box::new(Quadcopter);

        let rotors = (0..model.rotor_count())
            .map(|_| Propeller::new(spec.propeller_diameter, spec.propeller_pitch))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Vehicle {
            name: name.to_string(),
            config: VehicleConfig {
                weight: spec.weight,
                arm_length: spec.arm_length,
                gravity: spec.gravity,
                drag_coupling: spec.drag_coupling,
                inertia,
            },
            state: VehicleState::new(spec.position, spec.orientation),
            rotors,
            model,
            diverged: false,
        })
    }

    /// Commands all rotors at once. The whole batch is validated before any
    /// rotor changes, so a bad command never leaves the thrusts half-applied.
    pub fn set_rotor_speeds(&mut self, speeds: &[f64]) -> Result<(), SimulationError> {
        if speeds.len() != self.rotors.len() {
            return Err(SimulationError::Configuration(format!(
                "vehicle '{}' has {} rotors but {} speeds were given",
                self.name,
                self.rotors.len(),
                speeds.len()
            )));
        }
        if let Some(&speed) = speeds.iter().find(|&&speed| speed < 0.0) {
            return Err(SimulationError::InvalidSpeed { speed });
        }

        for (rotor, &speed) in self.rotors.iter_mut().zip(speeds) {
            rotor.set_speed(speed)?;
        }
        Ok(())
    }

    /// Advances this vehicle by `dt` and post-processes the result: attitude
    /// angles wrapped into (−π, π], vertical position clamped to the floor.
    /// On a solver failure the pre-step state is kept.
    pub fn step(&mut self, dt: f64) -> Result<(), SimulationError> {
        let thrusts: Vec<f64> = self.rotors.iter().map(Propeller::get_thrust).collect();

        let next = integrator::advance(
            self.model.as_ref(),
            &self.config,
            &thrusts,
            self.state.as_array(),
            dt,
            &self.name,
        )?;

        self.state = VehicleState::from_array(next);
        self.state.wrap_orientation();
        self.state.clamp_to_ground();
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut VehicleState {
        &mut self.state
    }

    pub fn rotors(&self) -> &[Propeller] {
        &self.rotors
    }

    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub(crate) fn mark_diverged(&mut self) {
        self.diverged = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_spec() -> VehicleSpec {
        VehicleSpec::quadcopter(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::zeros(),
            1.2,
            0.3,
            0.1,
            10.0,
            4.5,
        )
    }

    #[test]
    fn test_new_vehicle() {
        let vehicle = Vehicle::new("q1", &test_spec()).unwrap();
        assert_eq!(vehicle.name(), "q1");
        assert_eq!(vehicle.rotors().len(), 4);
        assert_eq!(vehicle.state().position().z, 10.0);
        assert!(!vehicle.is_diverged());
    }

    #[test]
    fn test_bad_geometry_fails_fast() {
        let mut spec = test_spec();
        spec.weight = 0.0;
        assert!(matches!(
            Vehicle::new("q1", &spec),
            Err(SimulationError::Configuration(_))
        ));

        let mut spec = test_spec();
        spec.propeller_pitch = -1.0;
        assert!(Vehicle::new("q1", &spec).is_err());
    }

    #[test]
    fn test_rotor_speed_count_checked() {
        let mut vehicle = Vehicle::new("q1", &test_spec()).unwrap();
        assert!(vehicle.set_rotor_speeds(&[1000.0, 1000.0]).is_err());
        assert!(vehicle.set_rotor_speeds(&[1000.0; 4]).is_ok());
    }

    #[test]
    fn test_negative_speed_leaves_rotors_untouched() {
        let mut vehicle = Vehicle::new("q1", &test_spec()).unwrap();
        vehicle.set_rotor_speeds(&[4000.0; 4]).unwrap();

        let result = vehicle.set_rotor_speeds(&[4000.0, -1.0, 4000.0, 4000.0]);
        assert!(matches!(result, Err(SimulationError::InvalidSpeed { .. })));
        for rotor in vehicle.rotors() {
            assert_eq!(rotor.get_speed(), 4000.0);
        }
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut vehicle = Vehicle::new("q1", &test_spec()).unwrap();
        vehicle.step(0.1).unwrap();
        assert!(vehicle.state().position().z < 10.0);
        assert_abs_diff_eq!(
            vehicle.state().linear_velocity().z,
            -9.81 * 0.1,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_step_clamps_to_ground() {
        let mut spec = test_spec();
        spec.position = Vector3::new(0.0, 0.0, 0.01);
        let mut vehicle = Vehicle::new("q1", &spec).unwrap();

        // A full second of free fall from 1 cm would end far below ground
        // without the clamp.
        for _ in 0..10 {
            vehicle.step(0.1).unwrap();
        }
        assert_eq!(vehicle.state().position().z, 0.0);
    }
}
