//! Short-range contact resolution
//!
//! Runs after the integrator has moved every particle. The grid is rebuilt
//! from the new positions and each candidate pair it yields goes through
//! [`resolve_pair`]:
//!
//! 1. push the two particles apart along the contact normal, half the
//!    overlap each (mass does not enter here)
//! 2. if they are approaching, exchange a mass-weighted impulse scaled by
//!    the elasticity `e`: the normal relative velocity becomes `-e` times
//!    what it was
//!
//! Coincident centres have no normal and are skipped.

use crate::simulation::grid::SpatialGrid;
use crate::simulation::states::Particle;

/// True if the two particles overlap with distinct centres
#[inline]
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    let d2 = (b.x - a.x).norm_squared();
    let min_dist = a.radius + b.radius;
    d2 > 0.0 && d2 < min_dist * min_dist
}

/// Resolve contact between particles `i` and `j` (`i != j`).
/// Returns whether they were in contact.
pub fn resolve_pair(particles: &mut [Particle], i: usize, j: usize, elasticity: f64) -> bool {
    let (p1, p2) = pair_mut(particles, i, j);

    let d = p2.x - p1.x;
    let dist2 = d.norm_squared();
    let min_dist = p1.radius + p2.radius;
    if !(dist2 < min_dist * min_dist && dist2 > 0.0) {
        return false;
    }

    let dist = dist2.sqrt();
    let n = d / dist;
    let overlap = 0.5 * (min_dist - dist);

    p1.x -= n * overlap;
    p2.x += n * overlap;

    // normal component of the relative velocity, negative when closing
    let vn = (p2.v - p1.v).dot(&n);
    if vn < 0.0 {
        let impulse = (1.0 + elasticity) * vn / (p1.m + p2.m);
        p1.v += n * (impulse * p2.m);
        p2.v -= n * (impulse * p1.m);
    }

    true
}

/// Resolve every candidate pair owned by cell `(cx, cy)`
pub fn resolve_cell(grid: &SpatialGrid, particles: &mut [Particle], cx: usize, cy: usize, elasticity: f64) -> usize {
    let mut contacts = 0;
    grid.for_each_pair_in_cell(cx, cy, |i, j| {
        if resolve_pair(particles, i, j, elasticity) {
            contacts += 1;
        }
    });
    contacts
}

/// Rebuild `grid` from current positions, then resolve the whole grid.
/// Returns the number of contacts handled.
pub fn resolve_collisions(grid: &mut SpatialGrid, particles: &mut [Particle], elasticity: f64) -> usize {
    grid.rebuild(particles);

    let mut contacts = 0;
    for cx in 0..grid.cols() {
        for cy in 0..grid.rows() {
            contacts += resolve_cell(grid, particles, cx, cy, elasticity);
        }
    }
    contacts
}

/// Overlapping pairs found through the grid (no mutation), as sorted
/// `(low, high)` index pairs. `grid` must already be rebuilt.
pub fn overlapping_pairs(grid: &SpatialGrid, particles: &[Particle]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    grid.for_each_pair(|i, j| {
        if overlaps(&particles[i], &particles[j]) {
            pairs.push((i.min(j), i.max(j)));
        }
    });
    pairs.sort_unstable();
    pairs
}

/// Reference O(n^2) scan for overlapping pairs, same format as
/// [`overlapping_pairs`]
pub fn brute_force_overlaps(particles: &[Particle]) -> Vec<(usize, usize)> {
    let n = particles.len();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if overlaps(&particles[i], &particles[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Two disjoint mutable borrows out of the arena
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    assert_ne!(i, j, "a particle cannot collide with itself");
    if i < j {
        let (left, right) = particles.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = particles.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
