use std::time::Instant;

use crate::configuration::config::{BoundaryConfig, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::collision::{brute_force_overlaps, overlapping_pairs};
use crate::simulation::forces::{Force, MatrixAttraction, Metric};
use crate::simulation::grid::SpatialGrid;
use crate::simulation::matrix::InteractionMatrix;
use crate::simulation::scenario::Simulation;
use crate::simulation::states::NVec2;

/// Helper to build a "Life"-sized scenario with `n` random particles.
/// The world grows with `n` so density stays roughly constant.
fn make_scenario(n: usize, parallel: bool) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::default();
    let half = 10.0 * (n as f64).sqrt();

    cfg.engine.boundary = BoundaryConfig::Wrap;
    cfg.engine.parallel = parallel;
    cfg.parameters.cutoff = Some(80.0);
    cfg.parameters.friction = 0.9;
    cfg.parameters.seed = 42;
    cfg.world.min = [-half, -half];
    cfg.world.max = [half, half];
    cfg.world.cell_size = 10.0;
    cfg.particles.count = n;
    cfg
}

pub fn bench_attraction() -> Result<(), ConfigError> {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let sim = Simulation::configure(make_scenario(n, false))?;
        let matrix = InteractionMatrix::from_rows(&ScenarioConfig::default().matrix)?;
        let mut out = vec![NVec2::zeros(); n];

        let term = |parallel| MatrixAttraction {
            matrix: matrix.clone(),
            strength: sim.parameters.strength,
            cutoff: sim.parameters.cutoff,
            inner_range: None,
            min_distance: 0.0,
            metric: Metric::Toroidal(sim.bounds),
            parallel,
        };
        let serial = term(false);
        let parallel = term(true);

        // Warm up
        serial.force(&sim.system, &mut out);
        parallel.force(&sim.system, &mut out);

        // Time serial
        let t0 = Instant::now();
        serial.force(&sim.system, &mut out);
        let dt_serial = t0.elapsed().as_secs_f64();

        // Time rayon
        let t1 = Instant::now();
        parallel.force(&sim.system, &mut out);
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s", dt_serial, dt_parallel);
    }
    Ok(())
}

pub fn bench_collisions() -> Result<(), ConfigError> {
    let ns = [500, 1000, 2000, 4000, 8000];

    for n in ns {
        let sim = Simulation::configure(make_scenario(n, false))?;
        let particles = sim.particles();

        let mut grid = SpatialGrid::new(&sim.bounds, sim.grid().cell_size());

        let t0 = Instant::now();
        grid.rebuild(particles);
        let via_grid = overlapping_pairs(&grid, particles);
        let dt_grid = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        let via_scan = brute_force_overlaps(particles);
        let dt_scan = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, grid = {:8.6} s, brute force = {:8.6} s, overlaps = {} / {}",
            dt_grid,
            dt_scan,
            via_grid.len(),
            via_scan.len()
        );
    }
    Ok(())
}

/// Benchmark full `Simulation::step` for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() -> Result<(), ConfigError> {
    println!("N,serial_ms,parallel_ms");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let mut serial = Simulation::configure(make_scenario(n, false))?;
        let t0 = Instant::now();
        serial.run(steps);
        let ms_serial = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut parallel = Simulation::configure(make_scenario(n, true))?;
        let t1 = Instant::now();
        parallel.run(steps);
        let ms_parallel = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_serial, ms_parallel);
    }
    Ok(())
}
