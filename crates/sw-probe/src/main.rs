//! SurfWalk probe CLI
//!
//! Walks a frame across a quadric, samples curvature along the way,
//! tessellates the surface, fires a pick ray at the mesh and inverts the hit
//! back to a local coordinate. The report is printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Default session (unit sphere)
//! sw-probe
//!
//! # Session from a config file
//! sw-probe session.json
//!
//! # Print the default config as a starting point
//! sw-probe --print-config
//! ```

mod config;
mod session;

use std::path::Path;
use std::process;

use config::SessionConfig;

fn print_usage() {
    eprintln!(
        r#"SurfWalk probe

USAGE:
    sw-probe [config.json]
    sw-probe --print-config

ARGS:
    [config.json]   Session configuration (defaults to a unit sphere)

OPTIONS:
    --print-config  Print the default configuration as JSON
    --help          Show this help message

ENVIRONMENT:
    RUST_LOG        Log filter, e.g. RUST_LOG=sw_geometry=debug
"#
    );
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("sw_probe=info".parse().unwrap_or_default())
        .add_directive("sw_geometry=info".parse().unwrap_or_default())
        .add_directive("sw_mesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1).map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_usage();
            return;
        }
        Some("--print-config") => {
            print_json(&SessionConfig::default());
            return;
        }
        Some(path) => match SessionConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    tracing::info!(
        surface = config.surface.kind.name(),
        parameters = ?config.surface.parameters,
        "starting probe session"
    );

    match session::run(&config) {
        Ok(report) => print_json(&report),
        Err(e) => {
            eprintln!("Error during probe session: {}", e);
            process::exit(1);
        }
    }
}
