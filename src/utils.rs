use crate::engine::Board;
use crate::error::PuzzleError;
use crate::solver::{SearchOutcome, Solution};

/// Line printed when the parity check rejects a board.
pub const UNSOLVABLE_MESSAGE: &str = "Unsolvable puzzle";

/// Parses a puzzle description into a `Board`.
///
/// The input is a whitespace-separated list of integers: the board size `k`
/// followed by the `k * k` tiles in row-major order, `0` being the blank. Line
/// breaks carry no meaning, so a board may be written one row per line or all
/// on one line.
///
/// # Returns
/// * `Ok(Board)` if the numbers form a valid board.
/// * `Err(PuzzleError::Parse)` if the input is empty, a token is not a
///   non-negative integer, or there are too few or too many tiles.
/// * `Err(PuzzleError::InvalidBoard)` if the tiles are not a permutation of
///   `0..k*k`.
///
/// # Examples
/// ```
/// use sliding_puzzle_solver::utils::parse_puzzle;
///
/// let board = parse_puzzle("3\n1 2 3\n4 0 6\n7 5 8\n").unwrap();
/// assert_eq!(board.size(), 3);
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(parse_puzzle("2\n1 2 3").is_err());
/// assert!(parse_puzzle("2\n1 x 3 0").is_err());
/// ```
pub fn parse_puzzle(input: &str) -> Result<Board, PuzzleError> {
    let mut tokens = input.split_whitespace();

    let size_token = tokens
        .next()
        .ok_or_else(|| PuzzleError::Parse("input is empty".to_string()))?;
    let size: usize = size_token
        .parse()
        .map_err(|_| PuzzleError::Parse(format!("board size '{}' is not a number", size_token)))?;
    if size == 0 {
        return Err(PuzzleError::Parse("board size must be at least 1".to_string()));
    }

    let area = size.checked_mul(size).ok_or_else(|| {
        PuzzleError::Parse(format!("board size {} is too large", size))
    })?;
    let mut cells = Vec::new();
    for (idx, token) in tokens.enumerate() {
        if idx >= area {
            return Err(PuzzleError::Parse(format!(
                "too many tiles: expected {} for a {}x{} board",
                area, size, size
            )));
        }
        let value: usize = token.parse().map_err(|_| {
            PuzzleError::Parse(format!(
                "tile '{}' at row {} col {} is not a non-negative integer",
                token,
                idx / size,
                idx % size
            ))
        })?;
        cells.push(value);
    }

    if cells.len() < area {
        return Err(PuzzleError::Parse(format!(
            "too few tiles: expected {} for a {}x{} board, found {}",
            area,
            size,
            size,
            cells.len()
        )));
    }

    Board::new(size, cells)
}

/// Renders a solution: the move count, every board along the path (each
/// followed by a blank line), then the two search counters.
pub fn render_solution(solution: &Solution) -> String {
    solution.to_string()
}

/// Renders any search outcome, using [`UNSOLVABLE_MESSAGE`] for rejected boards.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Solved(solution) => render_solution(solution),
        SearchOutcome::Unsolvable => format!("{}\n", UNSOLVABLE_MESSAGE),
    }
}
