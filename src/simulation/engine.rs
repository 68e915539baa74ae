//! High-level runtime engine settings
//!
//! Selects the integrator, the boundary policy and which passes run in a
//! tick. Fixed for the lifetime of a `Simulation`.

use crate::configuration::config::IntegratorConfig;
use crate::simulation::boundary::BoundaryPolicy;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or verlet
    pub boundary: BoundaryPolicy, // reflect, wrap or respawn
    pub attraction: bool, // false = skip the force pass entirely
    pub collision: bool, // false = skip grid rebuild and contact resolution
    pub parallel: bool, // force sums on the rayon pool
}
