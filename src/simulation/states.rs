//! Core state types for the particle simulation.
//!
//! Defines the 2D particle record and the system that owns them:
//! - `Particle` using `NVec2`
//! - `System` holding the particle arena and the tick counter
//!
//! Particles are addressed by index everywhere else (grid cells, collision
//! pairs), the `System` is the only owner.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub old: NVec2, // position at the previous tick, x - old is the implied velocity
    pub v: NVec2, // velocity (explicit for euler, cached for verlet)
    pub m: f64, // mass
    pub radius: f64, // collision radius
    pub kind: usize, // row/column in the interaction matrix
}

impl Particle {
    /// Build a particle whose velocity history is consistent with `v`
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64, kind: usize) -> Self {
        Self {
            x,
            old: x - v,
            v,
            m,
            radius,
            kind,
        }
    }

    /// Rewrite the previous position from the current position and velocity
    pub fn sync_history(&mut self) {
        self.old = self.x - self.v;
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>, // particle arena, fixed length for the run
    pub tick: u64, // number of completed ticks
}

impl System {
    /// Total linear momentum sum(m * v)
    pub fn momentum(&self) -> NVec2 {
        self.particles
            .iter()
            .fold(NVec2::zeros(), |acc, p| acc + p.v * p.m)
    }

    /// Total kinetic energy sum(0.5 * m * |v|^2)
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.m * p.v.norm_squared())
            .sum()
    }
}

/// Read-only particle view handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: usize,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.x.x,
            y: p.x.y,
            radius: p.radius,
            kind: p.kind,
        }
    }
}
