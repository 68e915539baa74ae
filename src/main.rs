use plsim::{ScenarioConfig, Simulation};
use plsim::{bench_attraction, bench_collisions, bench_step_curve};
use clap::Parser;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// scenario file under `scenarios/`
    #[arg(short, default_value = "graviton.yaml")]
    file_name: String,

    /// number of ticks to run
    #[arg(short, default_value_t = 600)]
    ticks: u64,

    /// log a progress line every this many ticks (0 = never)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_attraction()?;
        bench_collisions()?;
        bench_step_curve()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut sim = Simulation::configure(scenario_cfg)?;
    info!("loaded {} with {} particles", args.file_name, sim.particles().len());

    for _ in 0..args.ticks {
        sim.step();
        if args.report_every > 0 && sim.tick() % args.report_every == 0 {
            info!(
                "tick {:6}: kinetic energy {:.6}, momentum {:?}",
                sim.tick(),
                sim.system.kinetic_energy(),
                sim.system.momentum()
            );
        }
    }

    let mut per_type = vec![0usize; sim.type_count()];
    for view in sim.snapshot() {
        per_type[view.kind] += 1;
    }

    println!("ticks run:       {}", sim.tick());
    println!("particles:       {} {:?}", sim.particles().len(), per_type);
    println!("kinetic energy:  {:.6}", sim.system.kinetic_energy());
    println!("momentum:        [{:.6}, {:.6}]", sim.system.momentum().x, sim.system.momentum().y);
    println!("within bounds:   {}", sim.within_bounds());

    Ok(())
}
