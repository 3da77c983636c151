pub mod frame;
pub mod inertia;
pub mod integrator;
pub mod model;
