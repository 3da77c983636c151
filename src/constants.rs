// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Propeller thrust fit coefficients (diameter and pitch in inches, speed in
// RPM, thrust in newtons). Empirical static/dynamic fit; expect it to over-
// or under-estimate true thrust by roughly 15-30% depending on regime.
pub const THRUST_FIT_COEFFICIENT: f64 = 4.392e-8;
pub const PITCH_SPEED_COEFFICIENT: f64 = 4.23e-4;

// Quadcopter Constants
pub const DRAG_COUPLING_COEFFICIENT: f64 = 0.0245; // N·m of yaw reaction per N of differential thrust

// Simulation Parameters
pub const DEFAULT_TIME_STEP: f64 = 0.002; // s
pub const DEFAULT_TIME_SCALING: f64 = 1.0; // >1 slows playback, <1 accelerates it

// Solver tolerance for a single integration step
pub const SOLVER_TOLERANCE: f64 = 1e-6;
