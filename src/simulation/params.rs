//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - tick rate used to scale forces into velocity changes,
//! - matrix force strength, cutoff and distance floor,
//! - optional short-range repulsion,
//! - friction, collision elasticity and the deterministic seed

#[derive(Debug, Clone)]
pub struct Parameters {
    pub ticks_per_second: f64, // force -> velocity scaling
    pub strength: f64, // global multiplier on the matrix force
    pub cutoff: Option<f64>, // pairs farther apart than this contribute nothing
    pub min_distance: f64, // fixed distance floor on top of r_i + r_j
    pub repulsion: Option<Repulsion>, // short-range push, independent of type
    pub friction: f64, // per-tick velocity decay factor
    pub elasticity: f64, // collision restitution in [0, 1]
    pub spawn_speed: f64, // max |component| of a freshly sampled velocity
    pub seed: u64, // deterministic seed
}

/// Constant-magnitude push between any two particles closer than `range`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    pub range: f64,
    pub strength: f64,
}
