//! Force contributors for the particle engine
//!
//! Defines the `Force` trait, the `ForceSet` that sums terms, and the two
//! long-range terms:
//! - `MatrixAttraction`: the type-matrix 1/r law, all pairs within a cutoff
//! - `ShortRangeRepulsion`: a constant push between close neighbours
//!
//! Every term computes the force *on* particle `i` from its own point of
//! view, so `i` and `j` may see different coefficients. Each output slot is
//! written by exactly one particle's loop, which is what lets the pass run
//! on a rayon pool with results identical to the serial pass.

use rayon::prelude::*;

use crate::simulation::boundary::Bounds;
use crate::simulation::matrix::InteractionMatrix;
use crate::simulation::states::{NVec2, Particle, System};

/// Collection of force terms. Each term implements [`Force`] and their
/// contributions are summed into a single force vector per particle
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all particles in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec2]) {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(sys, out);
        }
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each particle
pub trait Force {
    fn force(&self, sys: &System, out: &mut [NVec2]);
}

/// How pair displacements are measured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Euclidean,
    Toroidal(Bounds), // nearest periodic image
}

impl Metric {
    /// Displacement from `from` to `to`
    #[inline]
    pub fn delta(&self, from: &NVec2, to: &NVec2) -> NVec2 {
        let d = to - from;
        match self {
            Metric::Euclidean => d,
            Metric::Toroidal(bounds) => bounds.wrapped_delta(d),
        }
    }
}

/// Type-matrix interaction with a 1/r magnitude:
/// `|F| = matrix[ki][kj] * strength * mi * mj / dist`
///
/// `dist` is floored at `max(ri + rj, min_distance)` so overlapping
/// particles don't produce singular forces. Pairs beyond `cutoff` are
/// skipped outright, and so are pairs inside `inner_range` when one is set
/// (that band belongs to the short-range repulsion instead).
pub struct MatrixAttraction {
    pub matrix: InteractionMatrix,
    pub strength: f64,
    pub cutoff: Option<f64>,
    pub inner_range: Option<f64>,
    pub min_distance: f64,
    pub metric: Metric,
    pub parallel: bool,
}

impl MatrixAttraction {
    /// Net matrix force on particle `i`
    pub fn force_on(&self, i: usize, particles: &[Particle]) -> NVec2 {
        let pi = &particles[i];
        let cutoff2 = self.cutoff.map(|c| c * c);
        let mut acc = NVec2::zeros();

        for (j, pj) in particles.iter().enumerate() {
            if i == j {
                continue;
            }

            let coefficient = self.matrix.get(pi.kind, pj.kind);
            if coefficient == 0.0 {
                continue;
            }

            let d = self.metric.delta(&pi.x, &pj.x);
            let r2 = d.norm_squared();
            if cutoff2.is_some_and(|c2| r2 > c2) {
                continue;
            }

            let r = r2.sqrt();
            if self.inner_range.is_some_and(|inner| r < inner) {
                continue;
            }

            let dist = r.max(pi.radius + pj.radius).max(self.min_distance);
            if dist <= 0.0 {
                continue; // coincident and no floor, direction undefined
            }

            let magnitude = coefficient * self.strength * pi.m * pj.m / dist;
            acc += d * (magnitude / dist);
        }

        acc
    }
}

impl Force for MatrixAttraction {
    fn force(&self, sys: &System, out: &mut [NVec2]) {
        let particles = &sys.particles;
        for_each_particle(self.parallel, out, |i| self.force_on(i, particles));
    }
}

/// Constant-magnitude push away from every neighbour closer than `range`,
/// regardless of type
pub struct ShortRangeRepulsion {
    pub range: f64,
    pub strength: f64,
    pub metric: Metric,
    pub parallel: bool,
}

impl ShortRangeRepulsion {
    /// Net repulsive force on particle `i`
    pub fn force_on(&self, i: usize, particles: &[Particle]) -> NVec2 {
        let pi = &particles[i];
        let range2 = self.range * self.range;
        let mut acc = NVec2::zeros();

        for (j, pj) in particles.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = self.metric.delta(&pi.x, &pj.x);
            let r2 = d.norm_squared();
            if r2 > 0.0 && r2 < range2 {
                acc -= d * (self.strength / r2.sqrt());
            }
        }

        acc
    }
}

impl Force for ShortRangeRepulsion {
    fn force(&self, sys: &System, out: &mut [NVec2]) {
        let particles = &sys.particles;
        for_each_particle(self.parallel, out, |i| self.force_on(i, particles));
    }
}

/// Add `f(i)` into `out[i]` for every slot, optionally on the rayon pool
fn for_each_particle<F>(parallel: bool, out: &mut [NVec2], f: F)
where
    F: Fn(usize) -> NVec2 + Sync,
{
    if parallel {
        out.par_iter_mut().enumerate().for_each(|(i, slot)| *slot += f(i));
    } else {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot += f(i);
        }
    }
}
