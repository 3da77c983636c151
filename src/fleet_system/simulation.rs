use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use nalgebra::Vector3;

use crate::errors::SimulationError;

use super::clock::SimulationClock;
use super::vehicle::{Vehicle, VehicleSpec};

/// The simulated fleet: one lock per vehicle so the clock thread and any
/// number of caller threads can touch different vehicles without contention,
/// and a reader can never observe a torn 12-vector.
pub struct Fleet {
    vehicles: HashMap<String, Mutex<Vehicle>>,
    simulation_time: Mutex<f64>,
}

impl Fleet {
    fn lock(&self, name: &str) -> Result<MutexGuard<'_, Vehicle>, SimulationError> {
        let slot = self
            .vehicles
            .get(name)
            .ok_or_else(|| SimulationError::UnknownVehicle(name.to_string()))?;
        Ok(recover(slot.lock()))
    }

    /// Steps every vehicle by `dt` and advances the simulation time.
    ///
    /// Divergence policy: a vehicle whose solver step fails is marked
    /// diverged and skipped from then on; the rest of the fleet keeps
    /// flying. The first failure of the pass is reported to the caller.
    pub(crate) fn step_all(&self, dt: f64) -> Result<(), SimulationError> {
        let mut first_error = None;

        for slot in self.vehicles.values() {
            let mut vehicle = recover(slot.lock());
            if vehicle.is_diverged() {
                continue;
            }
            if let Err(error) = vehicle.step(dt) {
                vehicle.mark_diverged();
                first_error.get_or_insert(error);
            }
        }

        *recover(self.simulation_time.lock()) += dt;

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub(crate) fn simulation_time(&self) -> f64 {
        *recover(self.simulation_time.lock())
    }
}

// A poisoned lock only means another thread panicked mid-access; vehicle
// invariants hold between field writes, so the guard is still usable.
fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Top-level handle owning the fleet and its real-time clock.
///
/// All per-vehicle operations take the vehicle's name and fail with
/// `UnknownVehicle` on a miss. They are safe to call from any thread while
/// the clock is running.
pub struct Simulation {
    fleet: Arc<Fleet>,
    clock: SimulationClock,
}

impl Simulation {
    /// Builds the fleet from named specs. Setup errors (bad geometry,
    /// duplicate names) are rejected here, before anything starts moving.
    pub fn new(specs: Vec<(String, VehicleSpec)>) -> Result<Self, SimulationError> {
        let mut vehicles = HashMap::new();

        for (name, spec) in specs {
            let vehicle = Vehicle::new(&name, &spec)?;
            if vehicles.insert(name.clone(), Mutex::new(vehicle)).is_some() {
                return Err(SimulationError::Configuration(format!(
                    "duplicate vehicle name '{}'",
                    name
                )));
            }
        }

        Ok(Simulation {
            fleet: Arc::new(Fleet {
                vehicles,
                simulation_time: Mutex::new(0.0),
            }),
            clock: SimulationClock::new(),
        })
    }

    pub fn set_rotor_speeds(&self, name: &str, speeds: &[f64]) -> Result<(), SimulationError> {
        self.fleet.lock(name)?.set_rotor_speeds(speeds)
    }

    pub fn position(&self, name: &str) -> Result<Vector3<f64>, SimulationError> {
        Ok(self.fleet.lock(name)?.state().position())
    }

    pub fn linear_velocity(&self, name: &str) -> Result<Vector3<f64>, SimulationError> {
        Ok(self.fleet.lock(name)?.state().linear_velocity())
    }

    pub fn orientation(&self, name: &str) -> Result<Vector3<f64>, SimulationError> {
        Ok(self.fleet.lock(name)?.state().orientation())
    }

    pub fn angular_velocity(&self, name: &str) -> Result<Vector3<f64>, SimulationError> {
        Ok(self.fleet.lock(name)?.state().angular_velocity())
    }

    /// Full 12-dimensional state snapshot, taken under the vehicle lock.
    pub fn state(&self, name: &str) -> Result<[f64; 12], SimulationError> {
        Ok(self.fleet.lock(name)?.state().as_array())
    }

    pub fn set_position(&self, name: &str, position: Vector3<f64>) -> Result<(), SimulationError> {
        self.fleet.lock(name)?.state_mut().set_position(position);
        Ok(())
    }

    pub fn set_orientation(
        &self,
        name: &str,
        orientation: Vector3<f64>,
    ) -> Result<(), SimulationError> {
        self.fleet
            .lock(name)?
            .state_mut()
            .set_orientation(orientation);
        Ok(())
    }

    pub fn is_diverged(&self, name: &str) -> Result<bool, SimulationError> {
        Ok(self.fleet.lock(name)?.is_diverged())
    }

    /// One manual step of the whole fleet; usable without the background
    /// clock for deterministic runs.
    pub fn update(&self, dt: f64) -> Result<(), SimulationError> {
        self.fleet.step_all(dt)
    }

    /// Accumulated simulated seconds across clock and manual steps.
    pub fn simulation_time(&self) -> f64 {
        self.fleet.simulation_time()
    }

    /// Starts the background real-time loop: every `dt · time_scaling` of
    /// wall time, the fleet advances by `dt` of simulated time.
    pub fn start_clock(&mut self, dt: f64, time_scaling: f64) {
        self.clock.start(Arc::clone(&self.fleet), dt, time_scaling);
    }

    /// Requests clock termination; returns immediately. Use `join_clock` to
    /// wait for the loop to actually exit.
    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    pub fn join_clock(&mut self) {
        self.clock.join();
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY;
    use approx::assert_abs_diff_eq;

    fn quad_spec(z: f64) -> VehicleSpec {
        VehicleSpec::quadcopter(
            Vector3::new(0.0, 0.0, z),
            Vector3::zeros(),
            1.2,
            0.3,
            0.1,
            10.0,
            4.5,
        )
    }

    #[test]
    fn test_unknown_vehicle_errors() {
        let simulation = Simulation::new(vec![("q1".to_string(), quad_spec(1.0))]).unwrap();
        assert!(matches!(
            simulation.position("nope"),
            Err(SimulationError::UnknownVehicle(_))
        ));
        assert!(simulation.set_rotor_speeds("nope", &[0.0; 4]).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Simulation::new(vec![
            ("q1".to_string(), quad_spec(1.0)),
            ("q1".to_string(), quad_spec(2.0)),
        ]);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_teleport_setters() {
        let simulation = Simulation::new(vec![("q1".to_string(), quad_spec(1.0))]).unwrap();

        simulation
            .set_position("q1", Vector3::new(4.0, -2.0, 7.5))
            .unwrap();
        simulation
            .set_orientation("q1", Vector3::new(7.0, 0.0, -0.3))
            .unwrap();

        assert_eq!(simulation.position("q1").unwrap(), Vector3::new(4.0, -2.0, 7.5));
        // The orientation setter wraps its input.
        let orientation = simulation.orientation("q1").unwrap();
        assert_abs_diff_eq!(
            orientation.x,
            7.0 - 2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_manual_update_advances_time_and_state() {
        let simulation = Simulation::new(vec![("q1".to_string(), quad_spec(50.0))]).unwrap();

        for _ in 0..5 {
            simulation.update(0.1).unwrap();
        }

        assert_abs_diff_eq!(simulation.simulation_time(), 0.5, epsilon = 1e-12);
        // Rotors are off, so the vehicle is in free fall.
        assert_abs_diff_eq!(
            simulation.position("q1").unwrap().z,
            50.0 - 0.5 * GRAVITY * 0.5 * 0.5,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_fleet_states_are_independent() {
        let simulation = Simulation::new(vec![
            ("falling".to_string(), quad_spec(20.0)),
            ("parked".to_string(), quad_spec(0.0)),
        ])
        .unwrap();

        for _ in 0..10 {
            simulation.update(0.05).unwrap();
        }

        assert!(simulation.position("falling").unwrap().z < 20.0);
        assert_eq!(simulation.position("parked").unwrap().z, 0.0);
        assert!(!simulation.is_diverged("falling").unwrap());
    }
}
