pub mod constants;
pub mod dynamics_system;
pub mod errors;
pub mod fleet_system;
pub mod rotor_system;

pub use constants::*;
pub use errors::SimulationError;

// Re-export commonly used items from dynamics_system
pub use dynamics_system::frame::{rotation_matrix, wrap_angle};
pub use dynamics_system::inertia::InertiaTensor;
pub use dynamics_system::model::{DynamicsModel, Quadcopter};

// Re-export commonly used items from fleet_system
pub use fleet_system::clock::SimulationClock;
pub use fleet_system::simulation::Simulation;
pub use fleet_system::state::VehicleState;
pub use fleet_system::vehicle::{Vehicle, VehicleConfig, VehicleSpec};

// Re-export commonly used items from rotor_system
pub use rotor_system::propeller::Propeller;
