//! Run one complete mission in the built-in arena.
//!
//! Spawns a default arena with a red object, a green drop zone, and a blue
//! home pad, then drives the mission controller until it completes or the
//! tick budget runs out.
//!
//! Usage:
//!   cargo run -p chroma_rover_sitl --bin mission_demo -- [OPTIONS]
//!
//! Options:
//!   --seed <N>       RNG seed for deterministic sensor noise
//!   --max-ticks <N>  Tick budget (default: 20000)
//!   --noise <SIGMA>  Proximity noise standard deviation (default: 0)
//!   -v, --verbose    Per-tick approach telemetry

use std::env;
use std::process;

use chroma_rover_core::mission::MissionController;
use chroma_rover_core::vision::TargetColor;
use chroma_rover_sitl::{run_mission, Arena, ArenaConfig, Beacon};

const DEMO_BEACON_RADIUS_M: f32 = 0.15;

struct Args {
    seed: Option<u64>,
    max_ticks: u64,
    noise: f32,
    verbose: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: None,
        max_ticks: 20_000,
        noise: 0.0,
        verbose: false,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--seed" => {
                i += 1;
                args.seed = Some(parse_arg(&raw, i, "seed"));
            }
            "--max-ticks" => {
                i += 1;
                args.max_ticks = parse_arg(&raw, i, "max-ticks");
            }
            "--noise" => {
                i += 1;
                args.noise = parse_arg(&raw, i, "noise");
            }
            "-v" | "--verbose" => {
                args.verbose = true;
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    args
}

fn parse_arg<T: std::str::FromStr>(raw: &[String], i: usize, name: &str) -> T {
    raw.get(i)
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --{name}");
            process::exit(1);
        })
}

fn print_usage() {
    eprintln!(
        "Usage: mission_demo [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed <N>       RNG seed for deterministic sensor noise\n\
         \x20 --max-ticks <N>  Tick budget (default: 20000)\n\
         \x20 --noise <SIGMA>  Proximity noise standard deviation (default: 0)\n\
         \x20 -v, --verbose    Per-tick approach telemetry\n\
         \x20 -h, --help       Show this help"
    );
}

fn main() {
    let args = parse_args();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = ArenaConfig {
        seed: args.seed,
        proximity_noise: args.noise,
        ..ArenaConfig::default()
    };
    // Demo-scale beacons: big enough to fill the coarse detection window
    // from a wander pass across the arena.
    let beacons = vec![
        Beacon::sized(TargetColor::Red, 0.5, 0.1, DEMO_BEACON_RADIUS_M),
        Beacon::sized(TargetColor::Green, -0.4, 0.6, DEMO_BEACON_RADIUS_M),
        Beacon::sized(TargetColor::Blue, 0.2, -0.6, DEMO_BEACON_RADIUS_M),
    ];

    let mut arena = match Arena::new(config, beacons) {
        Ok(arena) => arena,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };
    let mut controller = MissionController::new();

    println!("=== chroma_rover mission demo ===");
    let summary = run_mission(&mut arena, &mut controller, args.max_ticks);

    let elapsed_s = arena.sim_time_us() as f64 / 1_000_000.0;
    println!(
        "Result: {} after {} ticks ({elapsed_s:.1}s simulated), final phase: {}",
        if summary.completed {
            "mission complete"
        } else {
            "tick budget exhausted"
        },
        summary.ticks,
        summary.final_phase.name()
    );
}
