//! Cellarium - Entry Point
//!
//! Headless scenario runner: load a scenario from a JSON file or pick a
//! built-in preset, advance it a number of generations, and print the grid
//! plus a final state census to stdout.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use cellarium::config::SimulationSpec;
use cellarium::error::ConfigError;
use cellarium::geometry::CellShape;
use cellarium::grid::Topology;
use cellarium::neighborhood::Neighborhood;
use cellarium::rules::RuleKind;
use cellarium::simulation::Simulation;

/// Headless automaton runner
#[derive(Parser, Debug)]
#[command(name = "cellarium")]
#[command(about = "Run a cellular automaton scenario and print each generation")]
struct Args {
    /// Scenario file (JSON). Overrides --preset.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario: blinker, percolation, fire, schelling or wator
    #[arg(long, default_value = "blinker")]
    preset: String,

    /// Generations to advance
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Override the scenario's rng seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the grid after every generation instead of only the last
    #[arg(long, short = 'e')]
    every: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("cellarium=debug")
        .init();

    let args = Args::parse();

    let mut spec = match &args.scenario {
        Some(path) => load_spec(path)?,
        None => preset(&args.preset)?,
    };
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }

    let mut sim = Simulation::new(&spec)?;

    println!(
        "{:?} on {}x{} ({:?}, {:?} neighborhood), seed {}",
        spec.rule,
        sim.width(),
        sim.height(),
        spec.topology,
        spec.neighborhood,
        spec.seed
    );
    for (name, value) in sim.parameters() {
        println!("  {} = {}", name, value);
    }
    println!();
    println!("{}", sim);

    for _ in 0..args.ticks {
        sim.tick()?;
        if args.every {
            println!("tick {}", sim.ticks());
            println!("{}", sim);
        }
    }
    if !args.every {
        println!("tick {}", sim.ticks());
        println!("{}", sim);
    }

    let mut census: BTreeMap<i32, usize> = BTreeMap::new();
    for state in sim.states() {
        *census.entry(state).or_insert(0) += 1;
    }
    let counts: Vec<String> = census
        .iter()
        .map(|(state, count)| format!("{}: {}", state, count))
        .collect();
    println!("census: {}", counts.join(", "));

    Ok(())
}

fn load_spec(path: &Path) -> Result<SimulationSpec, ConfigError> {
    let text = fs::read_to_string(path)?;
    SimulationSpec::from_json(&text)
}

fn params(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// One ready-made scenario per rule, sized to watch in a terminal.
fn preset(name: &str) -> Result<SimulationSpec, String> {
    let spec = match name {
        "blinker" => {
            let mut states = vec![0; 25];
            for col in 1..4 {
                states[2 * 5 + col] = 1;
            }
            SimulationSpec {
                width: 5,
                height: 5,
                topology: Topology::Bounded,
                shape: CellShape::Square,
                neighborhood: Neighborhood::Adjacent,
                rule: RuleKind::GameOfLife,
                parameters: params(&[
                    ("aliveToAliveMin", 2.0),
                    ("aliveToAliveMax", 3.0),
                    ("deadToAliveMin", 3.0),
                    ("deadToAliveMax", 3.0),
                ]),
                initial_states: states,
                seed: 42,
            }
        }
        "percolation" => {
            // Water across the top row, a partial wall down column 4.
            let width = 9;
            let mut states = vec![0; width * width];
            for col in 0..width {
                states[col] = 1;
            }
            for row in 1..6 {
                states[row * width + 4] = 2;
            }
            SimulationSpec {
                width,
                height: width,
                topology: Topology::Bounded,
                shape: CellShape::Square,
                neighborhood: Neighborhood::Cardinal,
                rule: RuleKind::Percolation,
                parameters: params(&[("percolatedNeighbors", 1.0)]),
                initial_states: states,
                seed: 42,
            }
        }
        "fire" => {
            // Solid forest with the center tree alight; with spontaneous
            // rates at zero the fire burns outward in a clean ring.
            let width = 21;
            let mut states = vec![1; width * width];
            states[width * (width / 2) + width / 2] = 2;
            SimulationSpec {
                width,
                height: width,
                topology: Topology::Bounded,
                shape: CellShape::Square,
                neighborhood: Neighborhood::Adjacent,
                rule: RuleKind::Fire,
                parameters: params(&[
                    ("neighborsToIgnite", 1.0),
                    ("probTreeIgnites", 0.0),
                    ("probTreeCreated", 0.0),
                ]),
                initial_states: states,
                seed: 42,
            }
        }
        "schelling" => {
            // Vertical stripes of the two groups with an empty lane
            // between; nobody on a boundary is happy at 50%.
            let width = 12;
            let states = (0..width * width)
                .map(|i| match i % 3 {
                    0 => 1,
                    1 => 2,
                    _ => 0,
                })
                .collect();
            SimulationSpec {
                width,
                height: width,
                topology: Topology::Wrapped,
                shape: CellShape::Square,
                neighborhood: Neighborhood::Adjacent,
                rule: RuleKind::Schelling,
                parameters: params(&[("proportionNeededToStay", 0.5)]),
                initial_states: states,
                seed: 42,
            }
        }
        "wator" => {
            let width = 15;
            let states = (0..width * width)
                .map(|i| {
                    if i % 31 == 0 {
                        2
                    } else if i % 5 == 0 {
                        1
                    } else {
                        0
                    }
                })
                .collect();
            SimulationSpec {
                width,
                height: width,
                topology: Topology::Wrapped,
                shape: CellShape::Square,
                neighborhood: Neighborhood::Adjacent,
                rule: RuleKind::Wator,
                parameters: params(&[
                    ("fishAgeOfReproduction", 4.0),
                    ("sharkAgeOfReproduction", 10.0),
                    ("initialEnergy", 5.0),
                    ("energyBoost", 3.0),
                ]),
                initial_states: states,
                seed: 42,
            }
        }
        other => {
            return Err(format!(
                "unknown preset '{}' (expected blinker, percolation, fire, schelling or wator)",
                other
            ))
        }
    };
    Ok(spec)
}
