//! World bounds and what happens to particles that leave them
//!
//! Three policies, fixed at construction:
//! - `Reflect`: clamp to the inner edge (`min + r`, `max - r`) and point the
//!   offending velocity component back inward, scaled by `restitution`
//! - `Wrap`: toroidal world, positions are taken modulo the extent
//! - `Respawn`: an escaped particle is resampled somewhere inside the box
//!   with a fresh velocity, its history is discarded
//!
//! The policy runs last in a tick, so after `apply` every particle is inside.

use rand::Rng;

use crate::configuration::config::BoundaryConfig;
use crate::simulation::states::{NVec2, Particle};

/// Axis-aligned world rectangle `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: NVec2,
    pub max: NVec2,
}

impl Bounds {
    pub fn new(min: NVec2, max: NVec2) -> Self {
        Self { min, max }
    }

    pub fn extent(&self) -> NVec2 {
        self.max - self.min
    }

    /// True if `p` lies in `[min + inset, max - inset]` on both axes
    pub fn contains_inset(&self, p: &NVec2, inset: f64) -> bool {
        (0..2).all(|a| p[a] >= self.min[a] + inset && p[a] <= self.max[a] - inset)
    }

    /// True if `p` lies in the half-open box `[min, max)` used by the torus
    pub fn contains_half_open(&self, p: &NVec2) -> bool {
        (0..2).all(|a| p[a] >= self.min[a] && p[a] < self.max[a])
    }

    /// Shortest displacement on the torus: each axis picks the nearer of the
    /// direct and the wrapped image
    pub fn wrapped_delta(&self, mut d: NVec2) -> NVec2 {
        let extent = self.extent();
        for a in 0..2 {
            let half = 0.5 * extent[a];
            if d[a] > half {
                d[a] -= extent[a];
            } else if d[a] < -half {
                d[a] += extent[a];
            }
        }
        d
    }

    /// Map a position back into `[min, max)`
    pub fn wrap(&self, p: &NVec2) -> NVec2 {
        let extent = self.extent();
        let mut out = *p;
        for a in 0..2 {
            let mut local = (p[a] - self.min[a]).rem_euclid(extent[a]);
            // rem_euclid can round a tiny negative up to exactly `extent`
            if local >= extent[a] {
                local = 0.0;
            }
            out[a] = self.min[a] + local;
            if out[a] >= self.max[a] {
                out[a] = self.min[a];
            }
        }
        out
    }

    /// Uniform position with at least `inset` clearance from every wall
    pub fn sample_inside<R: Rng + ?Sized>(&self, inset: f64, rng: &mut R) -> NVec2 {
        NVec2::new(
            rng.gen_range(self.min.x + inset..self.max.x - inset),
            rng.gen_range(self.min.y + inset..self.max.y - inset),
        )
    }
}

/// Uniform velocity with each component in `[-speed, speed)`
pub fn sample_velocity<R: Rng + ?Sized>(speed: f64, rng: &mut R) -> NVec2 {
    if speed <= 0.0 {
        return NVec2::zeros();
    }
    NVec2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPolicy {
    Reflect { restitution: f64 },
    Wrap,
    Respawn,
}

impl BoundaryPolicy {
    pub fn from_config(cfg: BoundaryConfig, wall_restitution: f64) -> Self {
        match cfg {
            BoundaryConfig::Reflect => BoundaryPolicy::Reflect { restitution: wall_restitution },
            BoundaryConfig::Wrap => BoundaryPolicy::Wrap,
            BoundaryConfig::Respawn => BoundaryPolicy::Respawn,
        }
    }

    pub fn is_toroidal(&self) -> bool {
        matches!(self, BoundaryPolicy::Wrap)
    }

    /// Whether `p` satisfies this policy's position invariant
    pub fn contains(&self, bounds: &Bounds, p: &Particle) -> bool {
        match self {
            BoundaryPolicy::Wrap => bounds.contains_half_open(&p.x),
            BoundaryPolicy::Reflect { .. } | BoundaryPolicy::Respawn => {
                bounds.contains_inset(&p.x, p.radius)
            }
        }
    }

    /// Bring every particle back inside `bounds`. Returns how many were touched.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        bounds: &Bounds,
        particles: &mut [Particle],
        spawn_speed: f64,
        rng: &mut R,
    ) -> usize {
        let mut touched = 0;
        for p in particles.iter_mut() {
            let hit = match *self {
                BoundaryPolicy::Reflect { restitution } => reflect(bounds, p, restitution),
                BoundaryPolicy::Wrap => {
                    let wrapped = bounds.wrap(&p.x);
                    let moved = wrapped != p.x;
                    p.x = wrapped;
                    moved
                }
                BoundaryPolicy::Respawn => {
                    if bounds.contains_inset(&p.x, p.radius) {
                        false
                    } else {
                        p.x = bounds.sample_inside(p.radius, rng);
                        p.v = sample_velocity(spawn_speed, rng);
                        true
                    }
                }
            };
            if hit {
                touched += 1;
            }
        }
        touched
    }
}

fn reflect(bounds: &Bounds, p: &mut Particle, restitution: f64) -> bool {
    let mut hit = false;
    for a in 0..2 {
        let lo = bounds.min[a] + p.radius;
        let hi = bounds.max[a] - p.radius;
        if p.x[a] < lo {
            p.x[a] = lo;
            p.v[a] = p.v[a].abs() * restitution;
            hit = true;
        } else if p.x[a] > hi {
            p.x[a] = hi;
            p.v[a] = -p.v[a].abs() * restitution;
            hit = true;
        }
    }
    hit
}
