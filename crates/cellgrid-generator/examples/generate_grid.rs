//! Example printing a generated seed board.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_grid
//! ```
//!
//! Choose the board size and number of placed values:
//!
//! ```sh
//! cargo run --example generate_grid -- --size 16 --clues 40
//! ```
//!
//! Reproduce a board from a printed seed, or derive one from a phrase:
//!
//! ```sh
//! cargo run --example generate_grid -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! cargo run --example generate_grid -- --phrase "daily 2026-10-18"
//! ```

use std::process;

use cellgrid_generator::{GridGenerator, GridSeed};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board side length (a perfect square, at least 4).
    #[arg(long, value_name = "SIZE", default_value_t = 9)]
    size: usize,

    /// Number of cells that receive a value (defaults to the board size).
    #[arg(long, value_name = "COUNT")]
    clues: Option<usize>,

    /// Seed to reproduce, as 64 hex digits.
    #[arg(long, value_name = "HEX", conflicts_with = "phrase")]
    seed: Option<GridSeed>,

    /// Text to derive the seed from.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut generator = match GridGenerator::new(args.size) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    if let Some(clues) = args.clues {
        generator = generator.with_clues(clues);
    }

    let grid = match (args.seed, args.phrase) {
        (Some(seed), _) => generator.generate_with_seed(seed),
        (None, Some(phrase)) => generator.generate_with_seed(GridSeed::from_phrase(&phrase)),
        (None, None) => generator.generate(),
    };

    println!("{}", grid.matrix);
    println!();
    println!("Seed: {}", grid.seed);
}
