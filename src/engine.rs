//! Core state representation for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: The four ways the blank can slide.
//! - `Board`: A validated k×k arrangement of tiles, with methods for moving the
//!   blank, testing for the goal, serializing to a canonical key and generating
//!   reproducible random positions.
use crate::error::PuzzleError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// The value used for the blank cell.
pub const BLANK: usize = 0;

/// A direction in which the blank can be moved.
///
/// Moving the blank `Up` swaps it with the tile directly above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Swap the blank with the tile above it.
    Up,
    /// Swap the blank with the tile below it.
    Down,
    /// Swap the blank with the tile to its left.
    Left,
    /// Swap the blank with the tile to its right.
    Right,
}

impl Direction {
    /// All directions, in the order the search engine expands them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction that undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sliding_puzzle_solver::engine::Direction;
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.pad(name)
    }
}

/// Represents a k×k sliding-tile board.
///
/// Cells are stored row-major. Every value in `0..k*k` appears exactly once and
/// `0` is the blank; the constructors enforce this, so every `Board` in the
/// program is well-formed. Boards are plain values: moving the blank produces a
/// new board and never mutates the original.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<usize>,
    blank: usize,
}

impl Board {
    /// Creates a board of side `size` from `size * size` row-major cells.
    ///
    /// # Arguments
    /// * `size`: The side length `k` of the board.
    /// * `cells`: The tile values in row-major order, `0` being the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` when the cells are a permutation of `0..size * size`.
    /// * `Err(PuzzleError::InvalidBoard)` if `size` is zero, the number of cells is
    ///   wrong, a value is out of range, or a value appears twice.
    ///
    /// # Examples
    /// ```
    /// use sliding_puzzle_solver::engine::Board;
    ///
    /// let board = Board::new(2, vec![1, 2, 3, 0]).unwrap();
    /// assert!(board.is_goal());
    ///
    /// assert!(Board::new(2, vec![1, 1, 3, 0]).is_err());
    /// assert!(Board::new(2, vec![1, 2, 3]).is_err());
    /// ```
    pub fn new(size: usize, cells: Vec<usize>) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::InvalidBoard(
                "board size must be at least 1".to_string(),
            ));
        }
        let area = size.checked_mul(size).ok_or_else(|| {
            PuzzleError::InvalidBoard(format!("board size {} is too large", size))
        })?;
        if cells.len() != area {
            return Err(PuzzleError::InvalidBoard(format!(
                "expected {} tiles for a {}x{} board, found {}",
                area,
                size,
                size,
                cells.len()
            )));
        }

        let mut seen = vec![false; area];
        for (idx, &value) in cells.iter().enumerate() {
            if value >= area {
                return Err(PuzzleError::InvalidBoard(format!(
                    "tile {} at row {} col {} is out of range 0..{}",
                    value,
                    idx / size,
                    idx % size,
                    area
                )));
            }
            if seen[value] {
                return Err(PuzzleError::InvalidBoard(format!(
                    "tile {} appears more than once",
                    value
                )));
            }
            seen[value] = true;
        }

        // A permutation of 0..area always contains exactly one blank.
        let blank = cells
            .iter()
            .position(|&v| v == BLANK)
            .ok_or_else(|| PuzzleError::InvalidBoard("board has no blank".to_string()))?;

        Ok(Board { size, cells, blank })
    }

    /// Creates a board from a list of rows.
    ///
    /// The number of rows determines `k`; every row must have exactly `k` entries.
    ///
    /// # Examples
    /// ```
    /// use sliding_puzzle_solver::engine::Board;
    ///
    /// let board = Board::from_rows(&[vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    /// ```
    pub fn from_rows(rows: &[Vec<usize>]) -> Result<Self, PuzzleError> {
        let size = rows.len();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(PuzzleError::InvalidBoard(format!(
                    "row {} has {} tiles (expected {})",
                    r,
                    row.len(),
                    size
                )));
            }
        }
        Board::new(size, rows.concat())
    }

    /// Returns the canonical goal board of side `size`: tiles `1..k*k` in
    /// row-major order with the blank in the bottom-right corner.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn goal(size: usize) -> Self {
        assert!(size > 0, "board size must be at least 1");
        let area = size * size;
        let mut cells: Vec<usize> = (1..area).collect();
        cells.push(BLANK);
        Board {
            size,
            cells,
            blank: area - 1,
        }
    }

    /// Creates a solvable board by walking the blank `steps` random moves away from
    /// the goal.
    ///
    /// The walk never immediately undoes its previous move, so it does not waste
    /// steps bouncing back and forth. The same `seed` always yields the same board.
    /// The optimal solution length is at most `steps`.
    ///
    /// # Arguments
    /// * `size`: The side length `k` of the board.
    /// * `steps`: Number of random blank moves to apply.
    /// * `seed`: Seed for the `SmallRng` driving the walk.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn scrambled(size: usize, steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal(size);
        let mut last: Option<Direction> = None;

        for _ in 0..steps {
            let candidates: Vec<(Direction, Board)> = Direction::ALL
                .iter()
                .filter(|&&dir| last.map_or(true, |prev| dir != prev.opposite()))
                .filter_map(|&dir| board.apply_move(dir).map(|next| (dir, next)))
                .collect();

            match candidates.choose(&mut rng) {
                Some((dir, next)) => {
                    last = Some(*dir);
                    board = next.clone();
                }
                None => break, // 1x1 board: the blank cannot move
            }
        }
        board
    }

    /// Creates a board with the tiles shuffled uniformly at random.
    ///
    /// Unlike [`Board::scrambled`], half of all such boards are unsolvable.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn random_permutation(size: usize, seed: u64) -> Self {
        assert!(size > 0, "board size must be at least 1");
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells: Vec<usize> = (0..size * size).collect();
        cells.shuffle(&mut rng);
        let blank = cells.iter().position(|&v| v == BLANK).unwrap_or(0);
        Board { size, cells, blank }
    }

    /// Returns the side length `k` of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the tile at row `r` and column `c` (`0` for the blank).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> usize {
        assert!(r < self.size && c < self.size, "({}, {}) is off the board", r, c);
        self.cells[r * self.size + c]
    }

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.size)
    }

    /// Returns the `(row, col)` of the blank, both 0-based.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// Moves the blank one cell in `direction`.
    ///
    /// # Returns
    /// A new board with the blank swapped with its neighbor, or `None` when the
    /// blank already sits on the edge the move would cross.
    ///
    /// # Examples
    /// ```
    /// use sliding_puzzle_solver::engine::{Board, Direction};
    ///
    /// let goal = Board::goal(3);
    /// assert!(goal.apply_move(Direction::Down).is_none());
    /// let moved = goal.apply_move(Direction::Left).unwrap();
    /// assert_eq!(moved.cells(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
    /// ```
    pub fn apply_move(&self, direction: Direction) -> Option<Board> {
        let (r, c) = self.blank_position();
        let last = self.size - 1;
        let target = match direction {
            Direction::Up if r > 0 => self.blank - self.size,
            Direction::Down if r < last => self.blank + self.size,
            Direction::Left if c > 0 => self.blank - 1,
            Direction::Right if c < last => self.blank + 1,
            _ => return None,
        };

        let mut cells = self.cells.clone();
        cells.swap(self.blank, target);
        Some(Board {
            size: self.size,
            cells,
            blank: target,
        })
    }

    /// Returns every board reachable with a single blank move, paired with the move.
    pub fn neighbors(&self) -> Vec<(Direction, Board)> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.apply_move(dir).map(|next| (dir, next)))
            .collect()
    }

    /// Returns `true` if every tile sits on its goal cell.
    ///
    /// Tile `v` belongs at linear position `v - 1`. The blank is not checked: with
    /// every other tile in place, the one leftover cell is necessarily the blank's.
    pub fn is_goal(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(idx, &value)| value == BLANK || value == idx + 1)
    }

    /// Serializes the board into the key used by the search's visited set.
    ///
    /// Each cell is written row-major followed by a comma, so two boards of the
    /// same size share a key exactly when they are equal.
    ///
    /// # Examples
    /// ```
    /// use sliding_puzzle_solver::engine::Board;
    /// assert_eq!(Board::goal(2).canonical_key(), "1,2,3,0,");
    /// ```
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(self.cells.len() * 3);
        for value in &self.cells {
            key.push_str(&value.to_string());
            key.push(',');
        }
        key
    }
}

impl fmt::Display for Board {
    /// Formats the board as `k` lines of space-separated tiles, blank shown as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
