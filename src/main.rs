// Candy crush agent: reads one turn, searches until the deadline, writes the move
//
// Usage:
//   candy-crush-agent [input_path] [output_path]
//
// Paths default to the values in Agent.toml.

use log::{error, info};
use std::env;
use std::process;

use candy_crush_agent::agent::Agent;
use candy_crush_agent::config::Config;
use candy_crush_agent::debug_logger::DebugLogger;
use candy_crush_agent::io;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let config = Config::load_or_default();
    let args: Vec<String> = env::args().collect();
    let input_path = args.get(1).cloned().unwrap_or_else(|| config.io.input_path.clone());
    let output_path = args.get(2).cloned().unwrap_or_else(|| config.io.output_path.clone());

    if let Err(e) = run(config, &input_path, &output_path).await {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run(config: Config, input_path: &str, output_path: &str) -> candy_crush_agent::Result<()> {
    let input = io::read_input(input_path)?;
    info!(
        "Loaded {}x{} board with {} token kinds from {}",
        input.size, input.size, input.alphabet, input_path
    );

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let agent = Agent::new(config);

    let decision = agent.next_move(&input.board, input.time_left).await?;
    io::write_output(output_path, &decision)?;
    logger.log_decision(&input.board, &decision).await;

    info!("Wrote decision to {}", output_path);
    Ok(())
}
