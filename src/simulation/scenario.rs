//! Build a fully-initialized simulation from configuration and step it
//!
//! `Simulation::configure` takes a `ScenarioConfig` and produces the runtime
//! bundle containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world rectangle (`Bounds`) and the spatial grid over it
//! - system state (`System` with every particle spawned at tick 0)
//! - active force set (`ForceSet`)
//!
//! All validation happens here. A `Simulation` that exists is valid, so
//! `step` and `snapshot` have no error path.

use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{BodyConfig, IntegratorConfig, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::boundary::{sample_velocity, BoundaryPolicy, Bounds};
use crate::simulation::collision::resolve_collisions;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, MatrixAttraction, Metric, ShortRangeRepulsion};
use crate::simulation::grid::{SpatialGrid, MAX_CELLS};
use crate::simulation::integrator::{euler_integrator, verlet_integrator};
use crate::simulation::matrix::InteractionMatrix;
use crate::simulation::params::{Parameters, Repulsion};
use crate::simulation::states::{NVec2, Particle, ParticleView, System};

/// The simulation handle: owns every piece of mutable state for one run
pub struct Simulation {
    pub engine: Engine,
    pub parameters: Parameters,
    pub bounds: Bounds,
    pub matrix: InteractionMatrix,
    pub system: System,
    pub forces: ForceSet,
    grid: SpatialGrid,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Validate `cfg` and spawn the initial particle population
    pub fn configure(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let ScenarioConfig {
            engine: e_cfg,
            parameters: p_cfg,
            world,
            particles: pop,
            matrix,
        } = cfg;

        // Interaction matrix must be square and match the declared type count
        let matrix = InteractionMatrix::from_rows(&matrix)?;
        if matrix.size() != pop.type_count {
            return Err(ConfigError::TypeCountMismatch {
                type_count: pop.type_count,
                matrix_size: matrix.size(),
            });
        }

        // World. The negated comparisons below also reject NaN.
        if !(world.cell_size > 0.0) || !world.cell_size.is_finite() {
            return Err(ConfigError::NonPositiveCellSize(world.cell_size));
        }
        if !all_finite(&world.min) || !all_finite(&world.max) {
            return Err(ConfigError::NonFiniteBounds { min: world.min, max: world.max });
        }
        if !(world.min[0] < world.max[0] && world.min[1] < world.max[1]) {
            return Err(ConfigError::EmptyBounds { min: world.min, max: world.max });
        }
        let bounds = Bounds::new(NVec2::from(world.min), NVec2::from(world.max));
        let (cols, rows) = SpatialGrid::dimensions(&bounds, world.cell_size);
        if cols * rows > MAX_CELLS as f64 {
            return Err(ConfigError::GridTooLarge { cols, rows, limit: MAX_CELLS });
        }

        // Population defaults
        if !is_positive_finite(pop.mass) {
            return Err(ConfigError::NonPositiveMass { value: pop.mass, context: "default mass" });
        }
        if !(pop.radius > 0.0) { // rejects NaN too
            return Err(ConfigError::InvalidRadius { value: pop.radius, context: "default radius" });
        }

        // Parameters (runtime) from ParametersConfig
        let p = &p_cfg;
        check_range(
            "ticks_per_second",
            "(0, inf)",
            p.ticks_per_second,
            is_positive_finite(p.ticks_per_second),
        )?;
        check_range("strength", "(-inf, inf)", p.strength, p.strength.is_finite())?;
        check_range("friction", "(0, 1]", p.friction, p.friction > 0.0 && p.friction <= 1.0)?;
        check_range("elasticity", "[0, 1]", p.elasticity, (0.0..=1.0).contains(&p.elasticity))?;
        check_range(
            "wall_restitution",
            "[0, 1]",
            p.wall_restitution,
            (0.0..=1.0).contains(&p.wall_restitution),
        )?;
        check_range("min_distance", "[0, inf)", p.min_distance, p.min_distance >= 0.0)?;
        check_range(
            "spawn_speed",
            "[0, inf)",
            p.spawn_speed,
            p.spawn_speed >= 0.0 && p.spawn_speed.is_finite(),
        )?;
        if let Some(cutoff) = p.cutoff {
            check_range("cutoff", "[0, inf)", cutoff, cutoff >= 0.0)?;
        }
        if let Some(rep) = p.repulsion {
            check_range("repulsion.range", "[0, inf)", rep.range, rep.range >= 0.0)?;
            check_range("repulsion.strength", "(-inf, inf)", rep.strength, rep.strength.is_finite())?;
        }

        let parameters = Parameters {
            ticks_per_second: p_cfg.ticks_per_second,
            strength: p_cfg.strength,
            cutoff: p_cfg.cutoff,
            min_distance: p_cfg.min_distance,
            repulsion: p_cfg.repulsion.map(|r| Repulsion { range: r.range, strength: r.strength }),
            friction: p_cfg.friction,
            elasticity: p_cfg.elasticity,
            spawn_speed: p_cfg.spawn_speed,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: e_cfg.integrator,
            boundary: BoundaryPolicy::from_config(e_cfg.boundary, p_cfg.wall_restitution),
            attraction: e_cfg.attraction,
            collision: e_cfg.collision,
            parallel: e_cfg.parallel,
        };

        // Particles: explicit bodies first, then the random block
        let mut rng = ChaCha8Rng::seed_from_u64(parameters.seed);
        let mut particles = Vec::with_capacity(pop.bodies.len() + pop.count);
        for (index, bc) in pop.bodies.iter().enumerate() {
            let p = body_from_config(index, bc, pop.mass, pop.radius, pop.type_count)?;
            ensure_fits(&bounds, index, p.radius)?;
            particles.push(p);
        }
        if pop.count > 0 {
            ensure_fits(&bounds, particles.len(), pop.radius)?;
        }
        for _ in 0..pop.count {
            let kind = rng.gen_range(0..pop.type_count);
            let x = bounds.sample_inside(pop.radius, &mut rng);
            let v = sample_velocity(parameters.spawn_speed, &mut rng);
            particles.push(Particle::new(x, v, pop.mass, pop.radius, kind));
        }

        // Forces: matrix attraction plus the optional short-range push
        let metric = if engine.boundary.is_toroidal() {
            Metric::Toroidal(bounds)
        } else {
            Metric::Euclidean
        };
        let mut forces = ForceSet::new();
        if engine.attraction {
            forces = forces.with(MatrixAttraction {
                matrix: matrix.clone(),
                strength: parameters.strength,
                cutoff: parameters.cutoff,
                inner_range: parameters.repulsion.map(|r| r.range),
                min_distance: parameters.min_distance,
                metric,
                parallel: engine.parallel,
            });
        }
        if let Some(rep) = parameters.repulsion {
            forces = forces.with(ShortRangeRepulsion {
                range: rep.range,
                strength: rep.strength,
                metric,
                parallel: engine.parallel,
            });
        }

        let grid = SpatialGrid::new(&bounds, world.cell_size);
        let max_radius = particles.iter().map(|p| p.radius).fold(0.0, f64::max);
        if engine.collision && world.cell_size < 2.0 * max_radius {
            warn!(
                "cell_size {} is smaller than the largest particle diameter {}, some contacts will be missed",
                world.cell_size,
                2.0 * max_radius
            );
        }

        debug!(
            "configured {} particles, {} types, {}x{} grid, {:?} integrator, {:?} boundary",
            particles.len(),
            pop.type_count,
            grid.cols(),
            grid.rows(),
            engine.integrator,
            engine.boundary
        );

        Ok(Self {
            engine,
            parameters,
            bounds,
            matrix,
            system: System { particles, tick: 0 },
            forces,
            grid,
            rng,
        })
    }

    /// Advance every particle by exactly one tick:
    /// forces + integration, grid rebuild + contacts, boundary, history sync
    pub fn step(&mut self) {
        match self.engine.integrator {
            IntegratorConfig::Euler => euler_integrator(&mut self.system, &self.forces, &self.parameters),
            IntegratorConfig::Verlet => verlet_integrator(&mut self.system, &self.forces, &self.parameters),
        }

        let contacts = if self.engine.collision {
            resolve_collisions(&mut self.grid, &mut self.system.particles, self.parameters.elasticity)
        } else {
            0
        };

        let touched = self.engine.boundary.apply(
            &self.bounds,
            &mut self.system.particles,
            self.parameters.spawn_speed,
            &mut self.rng,
        );

        // contacts and walls edit v directly, keep x - old in step with it
        for p in self.system.particles.iter_mut() {
            p.sync_history();
        }

        self.system.tick += 1;
        trace!("tick {}: {} contacts, {} boundary events", self.system.tick, contacts, touched);
    }

    /// Run `ticks` steps back to back
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Render view of every particle, same order on every call
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.system.particles.iter().map(ParticleView::from).collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.system.particles
    }

    pub fn tick(&self) -> u64 {
        self.system.tick
    }

    pub fn type_count(&self) -> usize {
        self.matrix.size()
    }

    /// Grid as left by the last collision pass
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// True if every particle satisfies the boundary policy's invariant
    pub fn within_bounds(&self) -> bool {
        self.system
            .particles
            .iter()
            .all(|p| self.engine.boundary.contains(&self.bounds, p))
    }
}

// helpers ===========================================================================

fn check_range(name: &'static str, range: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, range, value })
    }
}

fn is_positive_finite(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

fn all_finite(v: &[f64; 2]) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// A particle must fit strictly inside the box, otherwise the inner edges cross
fn ensure_fits(bounds: &Bounds, index: usize, radius: f64) -> Result<(), ConfigError> {
    let extent = bounds.extent();
    if 2.0 * radius < extent.x && 2.0 * radius < extent.y {
        Ok(())
    } else {
        Err(ConfigError::ParticleTooLarge { index, radius })
    }
}

fn body_from_config(
    index: usize,
    bc: &BodyConfig,
    default_mass: f64,
    default_radius: f64,
    type_count: usize,
) -> Result<Particle, ConfigError> {
    if !all_finite(&bc.x) {
        return Err(ConfigError::NonFiniteBody { index, field: "position", value: bc.x });
    }
    if !all_finite(&bc.v) {
        return Err(ConfigError::NonFiniteBody { index, field: "velocity", value: bc.v });
    }
    let m = bc.m.unwrap_or(default_mass);
    if !is_positive_finite(m) {
        return Err(ConfigError::NonPositiveMass { value: m, context: "body mass" });
    }
    let radius = bc.radius.unwrap_or(default_radius);
    if !(radius >= 0.0) { // rejects NaN too
        return Err(ConfigError::InvalidRadius { value: radius, context: "body radius" });
    }
    if bc.kind >= type_count {
        return Err(ConfigError::TypeOutOfRange { index, kind: bc.kind, type_count });
    }
    Ok(Particle::new(NVec2::from(bc.x), NVec2::from(bc.v), m, radius, bc.kind))
}
