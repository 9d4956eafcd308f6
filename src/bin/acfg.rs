//! ACFG analysis binary.
//!
//! Usage:
//!
//! ```text
//! acfg [GAME.json]                         analyse a game file
//! acfg --random <players> [density] [seed] analyse a random friendship network
//! ```
//!
//! Set `RUST_LOG=debug` for detailed logging.

use std::error::Error;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use acfg_solver::acfg::{AcfgSolver, FriendshipNetwork, GameConfig, SolverConfig};

const DEFAULT_GAME: &str = "configs/two_pairs.json";

struct Job {
    name: String,
    network: FriendshipNetwork<usize>,
    config: SolverConfig,
    output: Option<String>,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("=== Altruistic Coalition Formation Game Solver ===\n");

    let total_start = Instant::now();
    let job = load_job()?;
    println!("Game: {}", job.name);
    println!(
        "Players: {} | Links: {} | Degree: {}",
        job.network.len(),
        job.network.link_count(),
        job.config.degree
    );
    println!();

    let structures = job.config.check_size(job.network.len())?;
    let mut solver = AcfgSolver::new(job.network, job.config)?;

    let bar = progress_bar(structures as u64, "utility table");
    let interval = (structures as u64 / 100).max(1);
    solver.build_table_with_callback(interval, |n| bar.set_position(n))?;
    bar.finish_and_clear();
    info!(
        structures,
        seconds = solver.stats().table_seconds,
        "utility table built"
    );

    let bar = progress_bar(structures as u64, "popularity");
    let mut report = solver.analyze_with_callback(&job.name, |n| bar.set_position(n))?;
    bar.finish_and_clear();
    report.elapsed_seconds = total_start.elapsed().as_secs_f64();

    report.print_summary();

    if let Some(path) = job.output {
        match report.save_json(&path) {
            Ok(_) => println!("\nSaved report: {}", path),
            Err(e) => eprintln!("\nError saving report: {}", e),
        }
    }
    Ok(())
}

fn load_job() -> Result<Job, Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--random") {
        let players: usize = args.get(1).ok_or("--random needs a player count")?.parse()?;
        let density: f64 = match args.get(2) {
            Some(d) => d.parse()?,
            None => 0.3,
        };
        let seed: u64 = match args.get(3) {
            Some(s) => s.parse()?,
            None => 42,
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let network = FriendshipNetwork::random(players, density, &mut rng)?;
        return Ok(Job {
            name: format!("random n={} p={} seed={}", players, density, seed),
            network,
            config: SolverConfig::default(),
            output: None,
        });
    }

    let path = args.first().map(String::as_str).unwrap_or(DEFAULT_GAME);
    let game = GameConfig::from_json_file(path)?;
    info!(path, "loaded game");
    Ok(Job {
        network: game.network()?,
        config: game.solver_config(),
        name: game.name,
        output: game.output,
    })
}

fn progress_bar(len: u64, label: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{msg:>14} [{bar:40}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar.set_message(label.to_string());
    bar
}
