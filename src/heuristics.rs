use crate::engine::{Board, BLANK};
use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// Returns the goal `(row, col)` of tile `value` on a board of side `size`.
///
/// Tile `v` belongs at linear position `v - 1`.
fn goal_position(value: usize, size: usize) -> (usize, usize) {
    ((value - 1) / size, (value - 1) % size)
}

/// Iterates over the non-blank tiles as `(row, col, goal_row, goal_col)`.
fn placed_tiles(board: &Board) -> impl Iterator<Item = (usize, usize, usize, usize)> + '_ {
    let size = board.size();
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != BLANK)
        .map(move |(idx, &value)| {
            let (goal_r, goal_c) = goal_position(value, size);
            (idx / size, idx % size, goal_r, goal_c)
        })
}

/// Counts the non-blank tiles that are not on their goal cell.
///
/// Every misplaced tile needs at least one move, so this never overestimates.
///
/// # Examples
/// ```
/// use sliding_puzzle_solver::engine::Board;
/// use sliding_puzzle_solver::heuristics::hamming_distance;
///
/// let board = Board::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(hamming_distance(&board), 2);
/// ```
pub fn hamming_distance(board: &Board) -> u32 {
    placed_tiles(board)
        .filter(|&(r, c, goal_r, goal_c)| r != goal_r || c != goal_c)
        .count() as u32
}

/// Sums, over all non-blank tiles, the grid distance to the tile's goal cell.
pub fn manhattan_distance(board: &Board) -> u32 {
    placed_tiles(board)
        .map(|(r, c, goal_r, goal_c)| (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32)
        .sum()
}

/// Sums, over all non-blank tiles, the straight-line distance to the tile's goal cell.
pub fn euclidean_distance(board: &Board) -> f64 {
    placed_tiles(board)
        .map(|(r, c, goal_r, goal_c)| {
            let dr = r.abs_diff(goal_r) as f64;
            let dc = c.abs_diff(goal_c) as f64;
            (dr * dr + dc * dc).sqrt()
        })
        .sum()
}

/// Counts linearly conflicting tile pairs, rows and columns scanned independently.
///
/// Two tiles conflict in a row when both belong in that row, both currently sit
/// in it, and the one further left belongs further right. Columns are checked the
/// same way, transposed.
pub fn linear_conflicts(board: &Board) -> u32 {
    let size = board.size();
    let mut conflicts = 0;

    for line in 0..size {
        // Goal columns of the tiles in row `line` that belong in that row, left to right.
        let row_goals: Vec<usize> = (0..size)
            .map(|c| board.get_tile(line, c))
            .filter(|&v| v != BLANK)
            .map(|v| goal_position(v, size))
            .filter(|&(goal_r, _)| goal_r == line)
            .map(|(_, goal_c)| goal_c)
            .collect();
        conflicts += count_inverted_pairs(&row_goals);

        let col_goals: Vec<usize> = (0..size)
            .map(|r| board.get_tile(r, line))
            .filter(|&v| v != BLANK)
            .map(|v| goal_position(v, size))
            .filter(|&(_, goal_c)| goal_c == line)
            .map(|(goal_r, _)| goal_r)
            .collect();
        conflicts += count_inverted_pairs(&col_goals);
    }

    conflicts
}

fn count_inverted_pairs(goals: &[usize]) -> u32 {
    let mut pairs = 0;
    for (i, &earlier) in goals.iter().enumerate() {
        pairs += goals[i + 1..].iter().filter(|&&later| earlier > later).count() as u32;
    }
    pairs
}

/// The family of distance estimates that can drive the search.
///
/// Each variant is a pure function of the board; a `Heuristic` carries no state
/// and can be copied and shared across threads freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Number of misplaced tiles.
    Hamming,
    /// Sum of per-tile grid distances.
    #[default]
    Manhattan,
    /// Sum of per-tile straight-line distances.
    Euclidean,
    /// Manhattan distance plus two moves per linearly conflicting pair.
    LinearConflict,
}

impl Heuristic {
    /// Every heuristic, weakest first.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Hamming,
        Heuristic::Euclidean,
        Heuristic::Manhattan,
        Heuristic::LinearConflict,
    ];

    /// Estimates the number of moves still needed to solve `board`.
    ///
    /// # Examples
    /// ```
    /// use sliding_puzzle_solver::engine::Board;
    /// use sliding_puzzle_solver::heuristics::Heuristic;
    ///
    /// let board = Board::new(3, vec![1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
    /// assert_eq!(Heuristic::Hamming.estimate(&board), 2.0);
    /// assert_eq!(Heuristic::Manhattan.estimate(&board), 2.0);
    /// assert_eq!(Heuristic::LinearConflict.estimate(&board), 4.0);
    /// assert_eq!(Heuristic::Manhattan.estimate(&Board::goal(3)), 0.0);
    /// ```
    pub fn estimate(&self, board: &Board) -> f64 {
        match self {
            Heuristic::Hamming => hamming_distance(board) as f64,
            Heuristic::Manhattan => manhattan_distance(board) as f64,
            Heuristic::Euclidean => euclidean_distance(board),
            Heuristic::LinearConflict => {
                (manhattan_distance(board) + 2 * linear_conflicts(board)) as f64
            }
        }
    }

    /// The selector string accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Hamming => "hamming",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::LinearConflict => "linear",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(Heuristic::Hamming),
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "linear" | "linear-conflict" => Ok(Heuristic::LinearConflict),
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}
