use crate::constants::SOLVER_TOLERANCE;
use crate::dynamics_system::model::DynamicsModel;
use crate::errors::SimulationError;
use crate::fleet_system::vehicle::VehicleConfig;

/// Bridges one vehicle's dynamics model to the external ODE solver.
struct EquationsOfMotion<'a> {
    model: &'a dyn DynamicsModel,
    config: &'a VehicleConfig,
    thrusts: &'a [f64],
}

impl fast_ode::DifferentialEquation<12> for EquationsOfMotion<'_> {
    fn ode_dot_y(&self, _t: f64, y: &fast_ode::Coord<12>) -> (fast_ode::Coord<12>, bool) {
        (
            fast_ode::Coord(self.model.derivative(&y.0, self.config, self.thrusts)),
            true,
        )
    }
}

/// Integrates one vehicle's state from local time 0 to `dt` with the rotor
/// thrusts held constant over the step.
///
/// The solver steps adaptively inside the interval; if it cannot reach the
/// final time within its internal budget the step is reported as a
/// divergence and the caller keeps the pre-step state.
pub fn advance(
    model: &dyn DynamicsModel,
    config: &VehicleConfig,
    thrusts: &[f64],
    state: [f64; 12],
    dt: f64,
    vehicle: &str,
) -> Result<[f64; 12], SimulationError> {
    let equations = EquationsOfMotion {
        model,
        config,
        thrusts,
    };

    let result = fast_ode::solve_ivp(
        &equations,
        (0.0, dt),
        fast_ode::Coord(state),
        |_, _| true,
        SOLVER_TOLERANCE,
        SOLVER_TOLERANCE * 10.0,
    );

    match result {
        fast_ode::IvpResult::FinalTimeReached(final_state) => Ok(final_state.0),
        _ => Err(SimulationError::NumericalDivergence {
            vehicle: vehicle.to_string(),
        }),
    }
}
