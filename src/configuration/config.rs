//! Configuration types for building a simulation, loadable from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! particle-life scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, boundary policy and pass toggles
//! - [`ParametersConfig`] – force constants, friction, elasticity, seed
//! - [`WorldConfig`]      – world rectangle and grid cell size
//! - [`ParticlesConfig`]  – random spawn block plus explicit particles
//! - `matrix`             – the `type_count x type_count` interaction matrix
//! - [`ScenarioConfig`]   – top-level wrapper handed to `Simulation::configure`
//!
//! # YAML format
//! The bounded "Graviton" setup:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"     # or "euler"
//!   boundary: "reflect"      # or "wrap", "respawn"
//!   attraction: true
//!   collision: true
//!
//! parameters:
//!   ticks_per_second: 60.0
//!   strength: 100.0
//!   cutoff: 200.0            # omit for no cutoff
//!   friction: 1.0
//!   elasticity: 0.9
//!   spawn_speed: 0.5
//!   seed: 42
//!
//! world:
//!   min: [-60.0, -60.0]
//!   max: [ 60.0,  60.0]
//!   cell_size: 10.0
//!
//! particles:
//!   count: 10
//!   type_count: 4
//!   mass: 1.0
//!   radius: 1.0
//!   bodies:
//!     - x: [0.0, 0.0]
//!       v: [1.0, 0.0]
//!       kind: 2
//!
//! matrix:
//!   - [ 1.0,  1.0, -1.0,  0.0]
//!   - [ 0.0,  1.0,  1.0, -1.0]
//!   - [-1.0,  0.0,  1.0,  1.0]
//!   - [ 1.0, -1.0,  0.0,  1.0]
//! ```
//!
//! Omitted sections and fields fall back to the defaults below. The
//! configuration is validated and mapped into runtime types by
//! `Simulation::configure`.

use serde::Deserialize;

/// Which integrator the engine uses
/// `integrator: "euler"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Explicit velocity, force scaled by 1 / tps
    #[default]
    Euler,

    #[serde(rename = "verlet")] // Velocity from position history, force applied as displacement
    Verlet,
}

/// What happens to particles leaving the world rectangle
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryConfig {
    #[serde(rename = "reflect")] // clamp to the inner edge and bounce
    #[default]
    Reflect,

    #[serde(rename = "wrap")] // toroidal world
    Wrap,

    #[serde(rename = "respawn")] // resample position and velocity
    Respawn,
}

/// High-level engine configuration
/// Controls the structure of a tick
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // time integrator
    pub boundary: BoundaryConfig, // boundary policy
    pub attraction: bool, // run the all-pairs matrix pass
    pub collision: bool, // run the grid collision pass
    pub parallel: bool, // evaluate per-particle force sums on the rayon pool
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Euler,
            boundary: BoundaryConfig::Reflect,
            attraction: true,
            collision: true,
            parallel: false,
        }
    }
}

/// Short-range repulsion block
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RepulsionConfig {
    pub range: f64, // push apart when closer than this
    pub strength: f64, // constant push magnitude
}

/// Global numerical and physical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub ticks_per_second: f64, // force -> velocity scaling
    pub strength: f64, // matrix force multiplier
    pub cutoff: Option<f64>, // interaction range, None = unlimited
    pub min_distance: f64, // distance floor on top of r_i + r_j
    pub repulsion: Option<RepulsionConfig>, // Life-style short-range push
    pub friction: f64, // per-tick velocity factor, (0, 1]
    pub elasticity: f64, // collision restitution, [0, 1]
    pub wall_restitution: f64, // velocity kept on a wall bounce, [0, 1]
    pub spawn_speed: f64, // max |component| of random initial velocities
    pub seed: u64, // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            strength: 1.0,
            cutoff: None,
            min_distance: 0.0,
            repulsion: None,
            friction: 0.999,
            elasticity: 0.9,
            wall_restitution: 1.0,
            spawn_speed: 0.5,
            seed: 0,
        }
    }
}

/// World rectangle and grid resolution
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub min: [f64; 2], // lower-left corner
    pub max: [f64; 2], // upper-right corner
    pub cell_size: f64, // side of one grid cell
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min: [-60.0, -60.0],
            max: [60.0, 60.0],
            cell_size: 10.0,
        }
    }
}

/// One explicitly placed particle. Missing mass/radius use the block defaults
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity
    #[serde(default)]
    pub m: Option<f64>, // mass
    #[serde(default)]
    pub radius: Option<f64>, // collision radius
    #[serde(default)]
    pub kind: usize, // type index
}

/// Particle population: explicit bodies first, then `count` random ones
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParticlesConfig {
    pub count: usize, // randomly spawned particles
    pub type_count: usize, // number of particle types
    pub mass: f64, // default mass
    pub radius: f64, // default radius
    pub bodies: Vec<BodyConfig>, // explicit particles
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 10,
            type_count: 4,
            mass: 1.0,
            radius: 1.0,
            bodies: Vec::new(),
        }
    }
}

/// Top-level scenario configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub world: WorldConfig,
    pub particles: ParticlesConfig,
    pub matrix: Vec<Vec<f64>>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            world: WorldConfig::default(),
            particles: ParticlesConfig::default(),
            matrix: vec![
                vec![1.0, 1.0, -1.0, 0.0],
                vec![0.0, 1.0, 1.0, -1.0],
                vec![-1.0, 0.0, 1.0, 1.0],
                vec![1.0, -1.0, 0.0, 1.0],
            ],
        }
    }
}
