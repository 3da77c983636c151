use crate::constants::{PITCH_SPEED_COEFFICIENT, THRUST_FIT_COEFFICIENT};
use crate::errors::SimulationError;

/// A single fixed-pitch propeller. Thrust is derived from the commanded
/// rotational speed and the blade geometry; it is never set directly.
///
/// Geometry is given in inches and speed in RPM, matching the units the
/// empirical thrust fit was calibrated in. Thrust comes out in newtons.
#[derive(Debug, Clone)]
pub struct Propeller {
    diameter: f64,
    pitch: f64,
    speed: f64,
    thrust: f64,
}

impl Propeller {
    pub fn new(diameter: f64, pitch: f64) -> Result<Self, SimulationError> {
        if diameter <= 0.0 || pitch <= 0.0 {
            return Err(SimulationError::Configuration(format!(
                "propeller diameter and pitch must be positive, got diameter = {} in, pitch = {} in",
                diameter, pitch
            )));
        }

        Ok(Propeller {
            diameter,
            pitch,
            speed: 0.0,
            thrust: 0.0,
        })
    }

    /// Stores the commanded speed and recomputes thrust. Negative speeds are
    /// rejected before any state changes.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), SimulationError> {
        if speed < 0.0 {
            return Err(SimulationError::InvalidSpeed { speed });
        }

        self.speed = speed;
        self.thrust = THRUST_FIT_COEFFICIENT * self.speed * self.diameter.powf(3.5)
            / self.pitch.sqrt()
            * (PITCH_SPEED_COEFFICIENT * self.speed * self.pitch);

        Ok(())
    }

    pub fn get_speed(&self) -> f64 {
        self.speed
    }

    pub fn get_thrust(&self) -> f64 {
        self.thrust
    }

    pub fn get_diameter(&self) -> f64 {
        self.diameter
    }

    pub fn get_pitch(&self) -> f64 {
        self.pitch
    }
}
