//! path-finder CLI entry point.
//!
//! Loads a locations/connections file pair, runs one search, and narrates
//! its progress to stdout. Under `--pace steps` every line read from stdin
//! grants one advance permit.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use path_finder::{
    load_map, spawn_search, City, Heuristic, Narrator, Pace, SearchConfig, Termination,
};

/// Step-wise A* path finder over named city maps.
#[derive(Parser, Debug)]
#[command(
    name = "path-finder",
    version = env!("PATH_FINDER_VERSION"),
    about = "Find an optimal path between two cities, narrating every step"
)]
struct Cli {
    /// Locations file: lines of "<name> <x> <y>", terminated by "END"
    #[arg(short = 'l', long = "locations")]
    locations: PathBuf,

    /// Connections file: lines of "<name> <count> <succ...>", terminated by "END"
    #[arg(short = 'c', long = "connections")]
    connections: PathBuf,

    /// Start city name
    #[arg(long = "from")]
    from: String,

    /// Goal city name
    #[arg(long = "to")]
    to: String,

    /// Remaining-cost estimate
    #[arg(long = "heuristic", value_enum, default_value = "distance")]
    heuristic: Heuristic,

    /// Pacing between search steps
    #[arg(long = "pace", value_enum, default_value = "fast")]
    pace: Pace,

    /// Suppress narration; print only the final outcome
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let map = match load_map(&cli.locations, &cli.connections) {
        Ok(map) => Arc::new(map),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let start = match City::new(&cli.from) {
        Ok(city) => city,
        Err(e) => {
            eprintln!("error: start city: {}", e);
            process::exit(1);
        }
    };
    let goal = match City::new(&cli.to) {
        Ok(city) => city,
        Err(e) => {
            eprintln!("error: goal city: {}", e);
            process::exit(1);
        }
    };
    for city in [&start, &goal] {
        if map.coordinates_of(city).is_err() {
            eprintln!("error: city '{}' is not on the map", city);
            process::exit(1);
        }
    }

    let pace = cli.pace;
    let handle = spawn_search(
        map,
        SearchConfig {
            start,
            goal,
            heuristic: cli.heuristic,
            pace,
        },
    );

    // In step mode a newline on stdin grants one advance permit.
    if pace == Pace::Steps {
        eprintln!("step mode: press Enter to advance, Ctrl-D to cancel");
        let controller = handle.controller();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if line.is_err() {
                    break;
                }
                controller.advance_one_step();
            }
            // stdin closed: abandon the search.
            controller.request_cancel();
        });
    }

    let mut narrator = Narrator::new(io::stdout().lock());
    for event in handle.events().iter() {
        if !cli.quiet {
            narrator.narrate(&event);
        }
    }
    drop(narrator);

    match handle.join() {
        Ok(Termination::PathFound { path, length }) => {
            let names: Vec<&str> = path.iter().map(City::name).collect();
            println!("{} ({:.2})", names.join(" -> "), length);
        }
        Ok(Termination::NoPath) => {
            eprintln!("no path between the chosen cities");
            process::exit(2);
        }
        Ok(Termination::Cancelled) => {
            eprintln!("search cancelled");
            process::exit(3);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
