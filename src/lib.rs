//! # Sliding Puzzle Solver Library
//!
//! This library solves the k×k sliding-tile puzzle (the 8-puzzle, the
//! 15-puzzle and their larger siblings) with a best-first search that returns a
//! minimum-move sequence of boards from a start position to the goal.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Reads a board, runs the search with a chosen heuristic and
//!   prints every board along the solution plus the search counters.
//! - `heuristic_evaluator`: Compares the heuristics on seeded random scrambles.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`) and blank moves (`Direction`).
//! - `heuristics`: The distance estimates that order the search (`Heuristic`).
//! - `solvability`: The inversion-parity check run before any search.
//! - `solver`: The search engine (`Solver`, `Solution`, `SearchOutcome`).
//! - `utils`: Parsing of puzzle input and rendering of results.
//! - `error`: The crate-wide error type (`PuzzleError`).
//!
//! ## Example
//! ```
//! use sliding_puzzle_solver::{solve, Heuristic, SearchOutcome};
//! use sliding_puzzle_solver::utils::parse_puzzle;
//!
//! let board = parse_puzzle("3  1 2 3  4 0 6  7 5 8").unwrap();
//! if let SearchOutcome::Solved(solution) = solve(&board, Heuristic::LinearConflict).unwrap() {
//!     assert_eq!(solution.moves, 2);
//!     assert!(solution.final_board().is_goal());
//! }
//! ```

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solvability;
pub mod solver;
pub mod utils;

pub use crate::engine::{Board, Direction};
pub use crate::error::PuzzleError;
pub use crate::heuristics::Heuristic;
pub use crate::solver::{solve, SearchOutcome, Solution, Solver};
