// Standalone replay tool for checking logged decisions
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --verbose              Show detailed output for each decision
//   --config <path>        Path to Agent.toml (default: Agent.toml)

use std::env;
use std::process;

use candy_crush_agent::config::Config;
use candy_crush_agent::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Candy Crush Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --verbose               Show detailed output for each decision");
    eprintln!("  --config <path>         Path to Agent.toml (default: Agent.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay candy_crush_decisions.jsonl");
    eprintln!("  replay candy_crush_decisions.jsonl --verbose");
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.is_empty() { 1 } else { 0 });
    }

    let log_file = &args[0];
    let mut verbose = false;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--verbose" => verbose = true,
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => {
                        eprintln!("Error: --config requires a path");
                        process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };

    let engine = ReplayEngine::new(config, verbose);
    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let results = engine.replay_all(&entries);
    engine.print_report(&results);

    if results.iter().any(|r| !r.matches) {
        process::exit(2);
    }
}
