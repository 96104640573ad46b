use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sliding_puzzle_solver::heuristics::Heuristic;
use sliding_puzzle_solver::solver::Solver;
use sliding_puzzle_solver::utils::{parse_puzzle, render_outcome};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Heuristic driving the search: hamming, manhattan, euclidean or linear
    #[clap(default_value = "manhattan")]
    heuristic: Heuristic,

    /// File holding the board size followed by the tiles (stdin when omitted)
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// Give up after expanding this many nodes
    #[clap(long)]
    max_expansions: Option<usize>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read board from stdin")?;
            Ok(content)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let content = read_input(args.input.as_ref())?;
    let board = parse_puzzle(&content).context("Invalid board")?;
    info!("loaded {}x{} board, solving with {}", board.size(), board.size(), args.heuristic);

    let mut solver = Solver::new(args.heuristic);
    if let Some(limit) = args.max_expansions {
        solver = solver.with_max_expansions(limit);
    }

    let outcome = solver.solve(&board)?;
    print!("{}", render_outcome(&outcome));
    Ok(())
}
