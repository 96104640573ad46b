use anyhow::Result;
use clap::Parser;
use log::debug;
use sliding_puzzle_solver::engine::Board;
use sliding_puzzle_solver::heuristics::Heuristic;
use sliding_puzzle_solver::solver::Solver;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search heuristics on random scrambles", long_about = None)]
struct Args {
    /// Side length of the boards
    #[clap(long, default_value_t = 3)]
    size: usize,

    /// Number of random boards to evaluate
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Random blank moves applied to the goal to build each board
    #[clap(long, default_value_t = 40)]
    scramble: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Default)]
struct Totals {
    explored: usize,
    expanded: usize,
    runs: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    anyhow::ensure!(args.size >= 2, "board size must be at least 2");

    let mut totals: HashMap<Heuristic, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({}x{}, {} scramble moves)...",
        args.boards, args.size, args.size, args.scramble
    );

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx as u64;
        let initial = Board::scrambled(args.size, args.scramble, seed);
        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);
        debug!("board {}:\n{}", board_idx, initial);

        for heuristic in Heuristic::ALL {
            let outcome = Solver::new(heuristic).solve(&initial)?;
            let Some(solution) = outcome.solution() else {
                // Scrambles start from the goal, so this only happens on an engine bug.
                eprintln!("Warning: board {} (Seed: {}) reported unsolvable", board_idx, seed);
                continue;
            };
            println!(
                "  Heuristic: {:<10}, Moves: {:<4}, Explored: {:<8}, Expanded: {}",
                heuristic, solution.moves, solution.explored, solution.expanded
            );
            let entry = totals.entry(heuristic).or_default();
            entry.explored += solution.explored;
            entry.expanded += solution.expanded;
            entry.runs += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Average Search Effort ---");

    let mut averages: Vec<(Heuristic, f64, f64)> = totals
        .iter()
        .filter(|(_, t)| t.runs > 0)
        .map(|(&h, t)| {
            let runs = t.runs as f64;
            (h, t.explored as f64 / runs, t.expanded as f64 / runs)
        })
        .collect();

    // Fewest expansions first
    averages.sort_by(|a, b| a.2.total_cmp(&b.2));

    for (heuristic, explored, expanded) in averages {
        println!(
            "Heuristic {:<10}: Average Explored = {:.2}, Average Expanded = {:.2}",
            heuristic, explored, expanded
        );
    }
    Ok(())
}
