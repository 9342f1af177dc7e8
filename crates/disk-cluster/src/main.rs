//! Disk-cluster simulation CLI.
//!
//! Commands:
//! - run: Evolve a cluster and its disks, writing snapshots to the output directory
//! - default-config: Print the default configuration as JSON

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use disk_cluster::photoevaporation::{MassLossGrid, PhotoevaporationEngine};
use disk_cluster::simulation::{
    gravity_code, new_cluster, stellar_code, JsonDirectorySink, Simulation, SimulationState,
};
use disk_cluster::{ConfigOverrides, SimulationConfig};

#[derive(Parser)]
#[command(name = "disk-cluster")]
#[command(version)]
#[command(about = "Protoplanetary disks in an evolving star cluster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// JSON configuration file; defaults are used when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Print the default configuration
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Run { config, overrides } => {
            let mut config = match config {
                Some(path) => SimulationConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SimulationConfig::default(),
            };
            overrides.apply(&mut config);
            config.validate()?;

            run(config)
        }
        Commands::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&SimulationConfig::default())?);
            Ok(())
        }
    }
}

fn run(config: SimulationConfig) -> Result<()> {
    let grid = MassLossGrid::from_path(&config.output.mass_loss_grid).with_context(|| {
        format!(
            "loading mass-loss table {}",
            config.output.mass_loss_grid.display()
        )
    })?;
    info!(rows = grid.len(), "loaded mass-loss table");

    let mut rng = ChaChaRng::seed_from_u64(config.cluster.seed);
    let stars = new_cluster(&config, &mut rng);
    let state = SimulationState::initialize(stars, &config)?;

    let gravity = gravity_code(&state.stars, &config);
    let stellar = stellar_code(&state.stars);
    let sink = JsonDirectorySink::create(&config.output.directory, config.cluster.n_stars)?;
    let engine = PhotoevaporationEngine::new(grid, config.min_disk_mass());

    let directory = config.output.directory.clone();
    fs::write(
        directory.join("config.json"),
        serde_json::to_string_pretty(&config)?,
    )?;

    let mut simulation = Simulation::new(config, state, engine, gravity, stellar, sink)?;
    let summary = simulation.run()?;

    let summary_json = serde_json::to_string_pretty(&summary)?;
    fs::write(directory.join("summary.json"), &summary_json)
        .context("writing run summary")?;
    println!("{summary_json}");
    Ok(())
}
