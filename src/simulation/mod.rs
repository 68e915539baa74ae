pub mod states;
pub mod params;
pub mod engine;
pub mod matrix;
pub mod boundary;
pub mod grid;
pub mod forces;
pub mod collision;
pub mod integrator;
pub mod scenario;
