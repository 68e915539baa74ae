pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub use simulation::states::{Particle, ParticleView, System, NVec2};
pub use simulation::matrix::InteractionMatrix;
pub use simulation::boundary::{BoundaryPolicy, Bounds};
pub use simulation::grid::SpatialGrid;
pub use simulation::forces::{Force, ForceSet, MatrixAttraction, Metric, ShortRangeRepulsion};
pub use simulation::collision::{resolve_pair, resolve_cell, resolve_collisions, overlapping_pairs, brute_force_overlaps};
pub use simulation::integrator::{euler_integrator, verlet_integrator};
pub use simulation::scenario::Simulation;
pub use configuration::config::{IntegratorConfig, BoundaryConfig, EngineConfig, ParametersConfig, RepulsionConfig, WorldConfig, BodyConfig, ParticlesConfig, ScenarioConfig};
pub use configuration::error::ConfigError;
pub use benchmark::benchmark::{bench_attraction, bench_collisions, bench_step_curve};
