//! Permutation-parity test deciding whether a board can reach the goal at all.
//!
//! Every blank move either leaves the inversion count unchanged (horizontal
//! moves) or changes it by `k - 1` while moving the blank one row (vertical
//! moves). That makes inversion parity, combined with the blank's row on even
//! boards, invariant across the whole reachable state space.

use crate::engine::{Board, BLANK};
use log::debug;

/// Binary indexed tree over tile values `1..=n`, used to count how many earlier
/// tiles exceed the current one.
struct Fenwick {
    tree: Vec<u64>,
}

impl Fenwick {
    fn new(n: usize) -> Self {
        Fenwick {
            tree: vec![0; n + 1],
        }
    }

    fn add(&mut self, mut idx: usize) {
        while idx < self.tree.len() {
            self.tree[idx] += 1;
            idx += idx & idx.wrapping_neg();
        }
    }

    /// Number of inserted values in `1..=idx`.
    fn prefix(&self, mut idx: usize) -> u64 {
        let mut total = 0;
        while idx > 0 {
            total += self.tree[idx];
            idx -= idx & idx.wrapping_neg();
        }
        total
    }
}

/// Counts pairs of non-blank tiles that appear in the wrong relative order when
/// the board is read row-major.
///
/// Runs in `O(n log n)` for `n = k*k - 1` tiles.
///
/// # Examples
/// ```
/// use sliding_puzzle_solver::engine::Board;
/// use sliding_puzzle_solver::solvability::count_inversions;
///
/// let board = Board::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// assert_eq!(count_inversions(&board), 2); // (6, 5) and (7, 5)
/// ```
pub fn count_inversions(board: &Board) -> u64 {
    let tiles = board.cells().len().saturating_sub(1);
    let mut seen = Fenwick::new(tiles);
    let mut inserted = 0u64;
    let mut inversions = 0u64;

    for &value in board.cells().iter().filter(|&&v| v != BLANK) {
        inversions += inserted - seen.prefix(value);
        seen.add(value);
        inserted += 1;
    }
    inversions
}

/// Decides whether `board` can be transformed into the goal.
///
/// With `k` the board size and the blank's row counted 1-based from the bottom:
/// - odd `k`: solvable iff the inversion count is even;
/// - even `k`: solvable iff the inversion count and the blank row have opposite parity.
///
/// # Examples
/// ```
/// use sliding_puzzle_solver::engine::Board;
/// use sliding_puzzle_solver::solvability::is_solvable;
///
/// assert!(is_solvable(&Board::goal(4)));
/// let swapped = Board::new(3, vec![1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
/// assert!(!is_solvable(&swapped));
/// ```
pub fn is_solvable(board: &Board) -> bool {
    let size = board.size();
    let inversions = count_inversions(board);
    let (blank_row, _) = board.blank_position();
    let blank_row_from_bottom = size - blank_row;

    let solvable = if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        (blank_row_from_bottom % 2 == 0) != (inversions % 2 == 0)
    };

    debug!(
        "solvability: k={} inversions={} blank_row_from_bottom={} -> {}",
        size, inversions, blank_row_from_bottom, solvable
    );
    solvable
}
