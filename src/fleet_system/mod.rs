pub mod clock;
pub mod simulation;
pub mod state;
pub mod vehicle;
