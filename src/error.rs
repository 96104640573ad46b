//! Error type shared by the board boundary, the input parser and the search engine.

use thiserror::Error;

/// Everything that can go wrong while loading or solving a puzzle.
///
/// An unsolvable board is *not* an error; it is reported as
/// [`SearchOutcome::Unsolvable`](crate::solver::SearchOutcome::Unsolvable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The tiles handed to a board constructor do not form a valid k×k puzzle.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// The textual puzzle description could not be read.
    #[error("failed to parse puzzle: {0}")]
    Parse(String),

    /// A heuristic selector that does not name any known estimator.
    #[error("unknown heuristic '{0}' (expected one of: hamming, manhattan, euclidean, linear)")]
    UnknownHeuristic(String),

    /// The frontier ran dry on a board that passed the solvability check.
    /// This points to a bug in the engine, never to a property of the puzzle.
    #[error(
        "frontier exhausted without reaching the goal \
         ({explored} nodes explored, {expanded} expanded)"
    )]
    FrontierExhausted { explored: usize, expanded: usize },

    /// The caller-supplied expansion budget was used up before the goal was found.
    #[error("expansion limit of {limit} reached after exploring {explored} nodes")]
    ExpansionLimitReached { limit: usize, explored: usize },
}
