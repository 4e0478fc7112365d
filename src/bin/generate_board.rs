//! Writes a random input file for the agent
//!
//! Usage: generate_board <N> <p> <time_left> [seed] [output_path]

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::process;

use candy_crush_agent::board::{Board, MAX_ALPHABET, MAX_BOARD_SIZE};

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> T {
    let raw = args.get(index).unwrap_or_else(|| {
        eprintln!("Usage: generate_board <N> <p> <time_left> [seed] [output_path]");
        process::exit(1);
    });
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {}: {}", name, raw);
        process::exit(1);
    })
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let size: usize = parse_arg(&args, 0, "board size");
    let alphabet: usize = parse_arg(&args, 1, "token count");
    let time_left: f64 = parse_arg(&args, 2, "time budget");

    if size == 0 || size > MAX_BOARD_SIZE {
        eprintln!("Board size must be in 1..={}", MAX_BOARD_SIZE);
        process::exit(1);
    }
    if alphabet == 0 || alphabet > MAX_ALPHABET {
        eprintln!("Token count must be in 1..={}", MAX_ALPHABET);
        process::exit(1);
    }

    let mut rng = match args.get(3) {
        Some(_) => StdRng::seed_from_u64(parse_arg(&args, 3, "seed")),
        None => StdRng::from_os_rng(),
    };

    let board = Board::random(size, alphabet, &mut rng);
    let text = format!("{}\n{}\n{}\n{}", size, alphabet, time_left, board);

    match args.get(4) {
        Some(path) => {
            if let Err(e) = fs::write(path, text) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", text),
    }
}
