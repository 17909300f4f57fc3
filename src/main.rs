use polysim::{bench_collision, bench_scene_tick};
use polysim::{Engine, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "falling_ball.yaml")]
    file_name: String,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_collision();
        bench_scene_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    let engine = Engine::new(scenario.parameters.clone());
    let summary = engine.run(&mut scenario.scene);

    info!(
        "done: {} ticks, t={:.4}, {} bodies left, kinetic energy {:.6}",
        summary.steps, summary.time, summary.bodies, summary.kinetic_energy
    );
    for (name, &id) in &scenario.names {
        if let Some(body) = scenario.scene.get(id) {
            let c = body.centroid();
            info!("{name}: centroid ({:.4}, {:.4})", c.x, c.y);
        }
    }

    Ok(())
}
