use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Numerical divergence while integrating vehicle '{vehicle}'")]
    NumericalDivergence { vehicle: String },

    #[error("Invalid rotor speed {speed} RPM: speeds must be non-negative")]
    InvalidSpeed { speed: f64 },

    #[error("Unknown vehicle '{0}'")]
    UnknownVehicle(String),
}
