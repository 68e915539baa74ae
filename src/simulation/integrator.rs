//! Fixed-tick integrators for the particle system
//!
//! Both schemes advance by one logical tick. The tick length is folded into
//! the force scaling (`ticks_per_second`), never reapplied to the position
//! update: a particle moves by exactly its velocity each tick.
//!
//! - `euler_integrator`: explicit velocity, `v += F / (m * tps)`
//! - `verlet_integrator`: velocity implied by `x - old`, force applied as a
//!   displacement correction `F / (m * tps^2)`
//!
//! In both, friction scales the whole step after the force is folded in.

use super::forces::ForceSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Advance by one tick with explicit Euler.
/// `v += dv`, friction, `old = x`, `x += v`
pub fn euler_integrator(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    let n = sys.particles.len();
    if n == 0 { // no particles, return
        return;
    }

    let mut f = vec![NVec2::zeros(); n];
    if !forces.is_empty() {
        forces.accumulate_forces(&*sys, &mut f);
    }

    let tps = params.ticks_per_second;
    for (p, force) in sys.particles.iter_mut().zip(f.iter()) {
        // a = F / m, dv = a * (1 / tps)
        p.v += *force / (p.m * tps);
        p.v *= params.friction;

        p.old = p.x;
        p.x += p.v;
    }
}

/// Advance by one tick with the position-based Verlet scheme.
///
/// Forces are evaluated at the positions the particles hold *before* the
/// move, i.e. what becomes `old`, so every particle sees the same snapshot of
/// its neighbours no matter the loop order.
pub fn verlet_integrator(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    let n = sys.particles.len();
    if n == 0 { // no particles, return
        return;
    }

    // velocity implied by the position history
    for p in sys.particles.iter_mut() {
        p.v = p.x - p.old;
    }

    let mut f = vec![NVec2::zeros(); n];
    if !forces.is_empty() {
        forces.accumulate_forces(&*sys, &mut f);
    }

    let tps2 = params.ticks_per_second * params.ticks_per_second;
    for (p, force) in sys.particles.iter_mut().zip(f.iter()) {
        // inherited drift plus the force displacement, then friction on
        // the combined step, same order as euler
        p.v += *force / (p.m * tps2);
        p.v *= params.friction;

        p.old = p.x;
        p.x += p.v;
    }
}
