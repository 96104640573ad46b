use crate::engine::{Board, Direction};
use crate::error::PuzzleError;
use crate::heuristics::Heuristic;
use crate::solvability::is_solvable;
use log::{debug, info, trace, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

/// Tunables for a search session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop with [`PuzzleError::ExpansionLimitReached`] once this many nodes have
    /// been expanded without reaching the goal. `None` searches until done.
    pub max_expansions: Option<usize>,
}

/// A board reached during the search, with the bookkeeping needed to rebuild
/// the path that led to it.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    key: String,
    /// Moves from the initial board.
    depth: usize,
    /// `depth + h(board)`, or just `h(board)` for the root.
    priority: f64,
    /// Arena index of the node this one was generated from.
    parent: Option<usize>,
    /// The blank move that produced this node from its parent.
    action: Option<Direction>,
}

/// Frontier entry pointing into the node arena.
///
/// `BinaryHeap` is a max-heap, so the ordering is reversed: the lowest priority
/// compares greatest, and among equal priorities the earliest inserted wins.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    priority: f64,
    node: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What the observer passed to [`Solver::solve_with_observer`] sees on each expansion.
#[derive(Clone, Copy, Debug)]
pub struct Expansion<'a> {
    pub board: &'a Board,
    pub depth: usize,
    pub priority: f64,
}

/// A minimum-move solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Number of blank moves from the initial board to the goal.
    pub moves: usize,
    /// Every board along the way, starting with the initial board and ending at the goal.
    pub path: Vec<Board>,
    /// The blank moves, one per step of `path`.
    pub directions: Vec<Direction>,
    /// Nodes placed on the frontier, the root included.
    pub explored: usize,
    /// Nodes taken off the frontier and processed. Frontier entries whose board
    /// had already been expanded are dropped when popped and not counted here.
    pub expanded: usize,
}

impl Solution {
    /// The goal board the solution ends on.
    pub fn final_board(&self) -> &Board {
        // `path` always holds at least the initial board.
        &self.path[self.path.len() - 1]
    }
}

impl fmt::Display for Solution {
    /// Writes the move count, every board along the path (each followed by a
    /// blank line), then the two search counters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimum number of moves = {}", self.moves)?;
        writeln!(f)?;
        for board in &self.path {
            writeln!(f, "{}", board)?;
            writeln!(f)?;
        }
        writeln!(f, "Number of nodes explored : {}", self.explored)?;
        writeln!(f, "Number of nodes expanded : {}", self.expanded)
    }
}

/// Terminal result of a search session that did not fail.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// The goal was reached.
    Solved(Solution),
    /// The board failed the parity check; no search was run.
    Unsolvable,
}

impl SearchOutcome {
    /// Returns the solution, if there is one.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Unsolvable => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Unsolvable => None,
        }
    }
}

/// Best-first solver for the sliding-tile puzzle.
///
/// Nodes are popped in ascending `depth + h` order, ties resolved first-in
/// first-out. A board is expanded at most once per session: children whose board
/// has already been expanded are dropped, and stale frontier duplicates are
/// skipped when popped.
///
/// # Examples
/// ```
/// use sliding_puzzle_solver::engine::Board;
/// use sliding_puzzle_solver::heuristics::Heuristic;
/// use sliding_puzzle_solver::solver::{SearchOutcome, Solver};
///
/// let board = Board::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
/// let outcome = Solver::new(Heuristic::Manhattan).solve(&board).unwrap();
/// match outcome {
///     SearchOutcome::Solved(solution) => assert_eq!(solution.moves, 2),
///     SearchOutcome::Unsolvable => unreachable!(),
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    heuristic: Heuristic,
    config: SearchConfig,
}

impl Solver {
    pub fn new(heuristic: Heuristic) -> Self {
        Solver {
            heuristic,
            config: SearchConfig::default(),
        }
    }

    /// Caps the number of expansions a single `solve` call may perform.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.config.max_expansions = Some(limit);
        self
    }

    /// Solves `initial`, returning `Unsolvable` without searching when the parity
    /// check rejects it.
    pub fn solve(&self, initial: &Board) -> Result<SearchOutcome, PuzzleError> {
        self.solve_with_observer(initial, |_| {})
    }

    /// Like [`Solver::solve`], calling `observer` for every node as it is expanded.
    pub fn solve_with_observer<F>(
        &self,
        initial: &Board,
        mut observer: F,
    ) -> Result<SearchOutcome, PuzzleError>
    where
        F: FnMut(&Expansion<'_>),
    {
        if !is_solvable(initial) {
            debug!("board rejected by parity check, skipping search");
            return Ok(SearchOutcome::Unsolvable);
        }

        debug!(
            "starting {} search on {}x{} board",
            self.heuristic,
            initial.size(),
            initial.size()
        );

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut explored = 0usize;
        let mut expanded = 0usize;

        let root_priority = self.heuristic.estimate(initial);
        nodes.push(SearchNode {
            board: initial.clone(),
            key: initial.canonical_key(),
            depth: 0,
            priority: root_priority,
            parent: None,
            action: None,
        });
        frontier.push(FrontierEntry {
            priority: root_priority,
            node: 0,
        });
        explored += 1;

        while let Some(entry) = frontier.pop() {
            let current = entry.node;
            if visited.contains(&nodes[current].key) {
                // Stale duplicate: another copy of this board was already expanded.
                continue;
            }
            expanded += 1;

            observer(&Expansion {
                board: &nodes[current].board,
                depth: nodes[current].depth,
                priority: nodes[current].priority,
            });
            trace!(
                "expanding node {} (g={}, f={:.3})",
                current,
                nodes[current].depth,
                nodes[current].priority
            );

            if nodes[current].board.is_goal() {
                let solution = reconstruct(&nodes, current, explored, expanded);
                info!(
                    "solved in {} moves ({} explored, {} expanded)",
                    solution.moves, explored, expanded
                );
                return Ok(SearchOutcome::Solved(solution));
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    debug!("expansion limit {} reached", limit);
                    return Err(PuzzleError::ExpansionLimitReached { limit, explored });
                }
            }

            let child_depth = nodes[current].depth + 1;
            for (direction, board) in nodes[current].board.neighbors() {
                let key = board.canonical_key();
                if visited.contains(&key) {
                    continue;
                }
                let priority = child_depth as f64 + self.heuristic.estimate(&board);
                let index = nodes.len();
                nodes.push(SearchNode {
                    board,
                    key,
                    depth: child_depth,
                    priority,
                    parent: Some(current),
                    action: Some(direction),
                });
                frontier.push(FrontierEntry {
                    priority,
                    node: index,
                });
                explored += 1;
            }

            visited.insert(nodes[current].key.clone());

            if expanded % 100_000 == 0 {
                debug!(
                    "{} expanded, {} explored, frontier size {}",
                    expanded,
                    explored,
                    frontier.len()
                );
            }
        }

        warn!(
            "frontier exhausted on a board that passed the solvability check \
             ({} explored, {} expanded)",
            explored, expanded
        );
        Err(PuzzleError::FrontierExhausted { explored, expanded })
    }
}

/// Walks parent links from `goal` back to the root and returns the path in
/// forward order.
fn reconstruct(nodes: &[SearchNode], goal: usize, explored: usize, expanded: usize) -> Solution {
    let mut path = Vec::with_capacity(nodes[goal].depth + 1);
    let mut directions = Vec::with_capacity(nodes[goal].depth);
    let mut cursor = Some(goal);

    while let Some(index) = cursor {
        let node = &nodes[index];
        path.push(node.board.clone());
        if let Some(direction) = node.action {
            directions.push(direction);
        }
        cursor = node.parent;
    }
    path.reverse();
    directions.reverse();

    Solution {
        moves: nodes[goal].depth,
        path,
        directions,
        explored,
        expanded,
    }
}

/// Solves `board` with `heuristic` and no expansion limit.
pub fn solve(board: &Board, heuristic: Heuristic) -> Result<SearchOutcome, PuzzleError> {
    Solver::new(heuristic).solve(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    fn board(cells: &[usize]) -> Board {
        let size = (cells.len() as f64).sqrt() as usize;
        Board::new(size, cells.to_vec()).unwrap()
    }

    fn solved(board: &Board, heuristic: Heuristic) -> Solution {
        solve(board, heuristic)
            .unwrap()
            .into_solution()
            .expect("board should be solvable")
    }

    /// Breadth-first distance from `start` to the goal, as an independent reference.
    fn bfs_distance(start: &Board) -> usize {
        let mut seen: HashMap<Board, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        seen.insert(start.clone(), 0);
        queue.push_back(start.clone());
        while let Some(current) = queue.pop_front() {
            let dist = seen[&current];
            if current.is_goal() {
                return dist;
            }
            for (_, next) in current.neighbors() {
                if !seen.contains_key(&next) {
                    seen.insert(next.clone(), dist + 1);
                    queue.push_back(next);
                }
            }
        }
        panic!("goal unreachable from {:?}", start);
    }

    /// Breadth-first distance to the goal for every board reachable from it.
    fn goal_distances(size: usize) -> HashMap<Board, usize> {
        let goal = Board::goal(size);
        let mut seen: HashMap<Board, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        seen.insert(goal.clone(), 0);
        queue.push_back(goal);
        while let Some(current) = queue.pop_front() {
            let dist = seen[&current];
            for (_, next) in current.neighbors() {
                if !seen.contains_key(&next) {
                    seen.insert(next.clone(), dist + 1);
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn assert_replays(initial: &Board, solution: &Solution) {
        assert_eq!(solution.path.len(), solution.moves + 1);
        assert_eq!(solution.directions.len(), solution.moves);
        assert_eq!(&solution.path[0], initial);

        let mut current = initial.clone();
        for (step, &direction) in solution.directions.iter().enumerate() {
            current = current
                .apply_move(direction)
                .expect("every recorded move must be legal");
            assert_eq!(current, solution.path[step + 1]);
        }
        assert!(current.is_goal());
        assert_eq!(&current, solution.final_board());
    }

    #[test]
    fn test_goal_board_needs_no_moves() {
        let goal = Board::goal(3);
        let solution = solved(&goal, Heuristic::Manhattan);
        assert_eq!(solution.moves, 0);
        assert_eq!(solution.path, vec![goal]);
        assert_eq!(solution.explored, 1);
        assert_eq!(solution.expanded, 1);
    }

    #[test]
    fn test_unsolvable_board_is_rejected_without_search() {
        let b = board(&[1, 2, 3, 4, 5, 6, 8, 7, 0]);
        let mut expansions = 0;
        let outcome = Solver::new(Heuristic::Manhattan)
            .solve_with_observer(&b, |_| expansions += 1)
            .unwrap();
        assert!(matches!(outcome, SearchOutcome::Unsolvable));
        assert!(outcome.solution().is_none());
        assert_eq!(expansions, 0);
    }

    #[test]
    fn test_one_move_board_counters() {
        // Root f=1; children Up (f=3), Left (f=3), Right (f=1, goal).
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let solution = solved(&b, Heuristic::Manhattan);
        assert_eq!(solution.moves, 1);
        assert_eq!(solution.directions, vec![Direction::Right]);
        assert_eq!(solution.explored, 4);
        assert_eq!(solution.expanded, 2);
    }

    #[test]
    fn test_single_legal_moves_solve_in_one() {
        let goal = Board::goal(3);
        for (direction, b) in goal.neighbors() {
            for h in Heuristic::ALL {
                let solution = solved(&b, h);
                assert_eq!(solution.moves, 1);
                assert_eq!(solution.directions, vec![direction.opposite()]);
            }
        }
    }

    #[test]
    fn test_center_blank_example() {
        let b = board(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let expected = bfs_distance(&b);
        assert_eq!(expected, 2);
        for h in Heuristic::ALL {
            let solution = solved(&b, h);
            assert_eq!(solution.moves, expected, "{} found a longer path", h);
            assert_replays(&b, &solution);
        }
    }

    #[test]
    fn test_consistent_heuristics_match_bfs() {
        for seed in 0..15 {
            let b = Board::scrambled(3, 18, seed);
            let expected = bfs_distance(&b);
            for h in [Heuristic::Hamming, Heuristic::Manhattan, Heuristic::Euclidean] {
                let solution = solved(&b, h);
                assert_eq!(solution.moves, expected, "seed {} with {}", seed, h);
                assert_replays(&b, &solution);
            }
        }
    }

    #[test]
    fn test_linear_conflict_is_admissible_and_optimal_on_scrambles() {
        let distances = goal_distances(3);
        for seed in 0..20 {
            let b = Board::scrambled(3, 30, seed);
            let expected = distances[&b];
            let solution = solved(&b, Heuristic::LinearConflict);
            assert_eq!(solution.moves, expected, "seed {}", seed);
            assert_replays(&b, &solution);
            for step in &solution.path {
                assert!(
                    Heuristic::LinearConflict.estimate(step) <= distances[step] as f64,
                    "seed {} overestimates {:?}",
                    seed,
                    step
                );
            }
        }
    }

    #[test]
    fn test_linear_conflict_priorities_can_decrease() {
        // Pair counting is not consistent: a single move may drop h by more than 1.
        let b = Board::scrambled(3, 30, 0);
        let mut priorities = Vec::new();
        Solver::new(Heuristic::LinearConflict)
            .solve_with_observer(&b, |e| priorities.push(e.priority))
            .unwrap();
        assert!(priorities.windows(2).any(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn test_popped_priorities_never_decrease_with_manhattan() {
        for seed in 0..10 {
            let b = Board::scrambled(3, 30, seed);
            let mut priorities = Vec::new();
            Solver::new(Heuristic::Manhattan)
                .solve_with_observer(&b, |e| priorities.push(e.priority))
                .unwrap();
            for pair in priorities.windows(2) {
                assert!(pair[0] <= pair[1], "f dropped from {} to {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_no_board_is_expanded_twice() {
        let b = Board::scrambled(3, 40, 3);
        for h in Heuristic::ALL {
            let mut keys = HashSet::new();
            let mut count = 0;
            let outcome = Solver::new(h)
                .solve_with_observer(&b, |e| {
                    count += 1;
                    assert!(keys.insert(e.board.canonical_key()), "re-expanded a board");
                })
                .unwrap();
            let solution = outcome.into_solution().unwrap();
            assert_eq!(count, solution.expanded);
            assert!(solution.explored >= solution.expanded);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let b = Board::scrambled(3, 40, 11);
        let first = solved(&b, Heuristic::Manhattan);
        let second = solved(&b, Heuristic::Manhattan);
        assert_eq!(first.path, second.path);
        assert_eq!(first.explored, second.explored);
        assert_eq!(first.expanded, second.expanded);
    }

    #[test]
    fn test_stronger_heuristic_expands_less() {
        let b = Board::scrambled(3, 40, 5);
        let hamming = solved(&b, Heuristic::Hamming);
        let manhattan = solved(&b, Heuristic::Manhattan);
        assert_eq!(hamming.moves, manhattan.moves);
        assert!(manhattan.expanded <= hamming.expanded);
    }

    #[test]
    fn test_expansion_limit() {
        let b = board(&[8, 7, 6, 5, 4, 3, 2, 1, 0]);
        let result = Solver::new(Heuristic::Hamming).with_max_expansions(10).solve(&b);
        match result {
            Err(PuzzleError::ExpansionLimitReached { limit, explored }) => {
                assert_eq!(limit, 10);
                assert!(explored > 10);
            }
            other => panic!("expected the expansion limit to trip, got {:?}", other),
        }

        // A limit that is never reached changes nothing.
        let easy = board(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let limited = Solver::new(Heuristic::Manhattan)
            .with_max_expansions(1_000)
            .solve(&easy)
            .unwrap();
        assert_eq!(limited.solution().map(|s| s.moves), Some(2));
    }

    #[test]
    fn test_two_by_two_boards() {
        // Every solvable 2x2 board is a rotation of the three tiles around the cycle.
        let b = board(&[0, 3, 2, 1]);
        assert!(is_solvable(&b));
        let solution = solved(&b, Heuristic::Manhattan);
        assert_eq!(solution.moves, bfs_distance(&b));
        assert_replays(&b, &solution);
    }

    #[test]
    fn test_solution_display() {
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let text = solved(&b, Heuristic::Manhattan).to_string();
        assert_eq!(
            text,
            "Minimum number of moves = 1\n\n\
             1 2 3\n4 5 6\n7 0 8\n\n\
             1 2 3\n4 5 6\n7 8 0\n\n\
             Number of nodes explored : 4\n\
             Number of nodes expanded : 2\n"
        );
    }

    #[test]
    fn test_frontier_entry_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { priority: 3.0, node: 0 });
        heap.push(FrontierEntry { priority: 1.5, node: 1 });
        heap.push(FrontierEntry { priority: 1.5, node: 2 });
        heap.push(FrontierEntry { priority: 2.0, node: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }
}
