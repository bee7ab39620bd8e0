//! Replays an input script against a grid and prints the result.
//!
//! # Usage
//!
//! ```sh
//! echo "click 0 0
//! key 5
//! key ArrowRight
//! key 3
//! print" | cargo run -- --size 4
//! ```
//!
//! Start from a board file or a generated board:
//!
//! ```sh
//! cargo run -- --puzzle board.txt --script moves.txt
//! cargo run -- --generate --size 9 --clues 20 --seed <HEX>
//! ```
//!
//! Set `RUST_LOG=cellgrid_interaction=debug` to trace every selection flip and
//! value change.

use std::{
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use cellgrid_app::{AppError, Session, render::render_grid, script::parse_script};
use cellgrid_core::Matrix;
use cellgrid_generator::{GridGenerator, GridSeed};
use cellgrid_interaction::InteractionController;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Side length of the empty or generated board.
    #[arg(long, value_name = "SIZE", default_value_t = 9)]
    size: usize,

    /// Board file: whitespace-separated values, one row per line, `_` or `.`
    /// for empty cells.
    #[arg(long, value_name = "FILE", conflicts_with = "generate")]
    puzzle: Option<PathBuf>,

    /// Start from a generated seed board.
    #[arg(long)]
    generate: bool,

    /// Seed for `--generate`, as 64 hex digits.
    #[arg(long, value_name = "HEX", requires = "generate")]
    seed: Option<GridSeed>,

    /// Number of values placed by `--generate`.
    #[arg(long, value_name = "COUNT", requires = "generate")]
    clues: Option<usize>,

    /// Script to replay; read from standard input if omitted.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Do not echo change batches while replaying.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let matrix = initial_matrix(args)?;
    let steps = parse_script(&read_script(args.script.as_deref())?)?;

    let mut session = Session::new(InteractionController::new(matrix), !args.quiet);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = session.run(&steps, &mut out)?;
    log::info!(
        "replayed {} steps: {} changed the grid, {} rejected",
        steps.len(),
        summary.changed,
        summary.rejected
    );

    write!(out, "{}", render_grid(session.controller().matrix()))?;
    out.flush()?;
    Ok(())
}

fn initial_matrix(args: &Args) -> Result<Matrix, AppError> {
    if let Some(path) = &args.puzzle {
        let text = read_file(path)?;
        return Ok(text.parse()?);
    }
    if args.generate {
        let mut generator = GridGenerator::new(args.size)?;
        if let Some(clues) = args.clues {
            generator = generator.with_clues(clues);
        }
        let grid = match args.seed {
            Some(seed) => generator.generate_with_seed(seed),
            None => generator.generate(),
        };
        eprintln!("seed: {}", grid.seed);
        return Ok(grid.matrix);
    }
    Ok(Matrix::empty(args.size)?)
}

fn read_script(path: Option<&Path>) -> Result<String, AppError> {
    if let Some(path) = path {
        read_file(path)
    } else {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    }
}

fn read_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_owned(),
        source,
    })
}
