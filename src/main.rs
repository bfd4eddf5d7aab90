//! Lenia Trails CLI - Run headless simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use lenia_trails::{Simulation, SimulationConfig, SimulationStats};

/// Frame time fed to the epoch timer for each tick.
const FRAME_SECONDS: f32 = 1.0 / 60.0;

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [ticks]", args[0]);
        eprintln!();
        eprintln!("Run a Lenia Trails simulation headless from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  ticks        Number of ticks at 60 ticks/s (default: 600)");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let ticks: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(600);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SimulationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let mut sim = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let params = *sim.params();
    println!("Lenia Trails Simulation");
    println!("=======================");
    println!("Grid: {}x{}", sim.width(), sim.height());
    println!(
        "Params: R={}, m={}, s={}, dt={}, rad={}",
        params.kernel_radius,
        params.growth_center,
        params.growth_width,
        params.dt,
        params.seed_radius
    );
    println!("Randomize every: {}s", sim.config().randomize_interval);
    println!("Ticks: {}", ticks);
    println!();

    print_stats("Initial state", &SimulationStats::from_lattice(sim.lattice()));

    println!("Running simulation...");
    let start = Instant::now();

    for i in 0..ticks {
        if sim.update(FRAME_SECONDS) {
            let p = sim.params();
            println!(
                "  Epoch {} at tick {}: R={:.2}, m={:.4}, s={:.4}, dt={:.3}, rad={:.2}",
                sim.epoch(),
                i + 1,
                p.kernel_radius,
                p.growth_center,
                p.growth_width,
                p.dt,
                p.seed_radius
            );
        }

        // Print progress every 10%
        if (i + 1) % (ticks / 10).max(1) == 0 {
            let stats = SimulationStats::from_lattice(sim.lattice());
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Tick {}/{}: activation={:.3}, active={}, {:.1} ticks/s",
                i + 1,
                ticks,
                stats.total_activation,
                stats.active_cells,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &SimulationStats::from_lattice(sim.lattice()));

    let lit = sim
        .trail()
        .chunks_exact(3)
        .filter(|px| px.iter().any(|&c| c > 0))
        .count();
    println!("Lit trail pixels: {}", lit);
    println!(
        "Time: {:.2}s ({:.1} ticks/s)",
        elapsed.as_secs_f32(),
        ticks as f32 / elapsed.as_secs_f32()
    );
}

fn print_stats(label: &str, stats: &SimulationStats) {
    println!("{}:", label);
    println!("  Total activation: {:.6}", stats.total_activation);
    println!("  Active cells: {}", stats.active_cells);
    println!(
        "  Value range: [{:.6}, {:.6}]",
        stats.min_value, stats.max_value
    );
    println!();
}

fn print_example_config() {
    let config = SimulationConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}
