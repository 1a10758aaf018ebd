use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::board::{Board, Move};

/// Tuning for the search. Neither option changes the answer, only the work done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Skip boards that were already expanded on the same side.
    pub visited_set: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { visited_set: true }
    }
}

/// One node of the search tree. `previous` indexes the parent in the arena of
/// the side that produced it; the root has none.
#[derive(Debug)]
struct SearchNode {
    board: Board,
    moves: u32,
    previous: Option<usize>,
}

/// Frontier entry. `BinaryHeap` is a max-heap, so the ordering is reversed:
/// lowest priority first, then the deeper node, then the earlier insertion.
#[derive(Debug, PartialEq, Eq)]
struct Candidate {
    priority: u32,
    moves: u32,
    node: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.moves.cmp(&other.moves))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Step {
    Goal(usize),
    Expanded,
    Exhausted,
}

/// A* over one starting board: the arena owns every node, the frontier only
/// holds indices into it.
struct Search {
    arena: Vec<SearchNode>,
    frontier: BinaryHeap<Candidate>,
    visited: Option<FxHashSet<Board>>,
}

impl Search {
    fn new(root: Board, options: SearchOptions) -> Self {
        let mut search = Self {
            arena: Vec::new(),
            frontier: BinaryHeap::new(),
            visited: options.visited_set.then(FxHashSet::default),
        };
        search.push(root, 0, None);
        search
    }

    fn push(&mut self, board: Board, moves: u32, previous: Option<usize>) {
        let node = self.arena.len();
        let priority = moves + board.manhattan();
        self.arena.push(SearchNode {
            board,
            moves,
            previous,
        });
        self.frontier.push(Candidate {
            priority,
            moves,
            node,
        });
    }

    /// Pops the best unexpanded node and either reports it as the goal or
    /// pushes its successors.
    fn step(&mut self) -> Step {
        let current = loop {
            let Some(candidate) = self.frontier.pop() else {
                return Step::Exhausted;
            };
            let fresh = match self.visited.as_mut() {
                Some(visited) => visited.insert(self.arena[candidate.node].board.clone()),
                None => true,
            };
            if fresh {
                break candidate.node;
            }
        };

        let node = &self.arena[current];
        if node.board.is_goal() {
            return Step::Goal(current);
        }

        let moves = node.moves + 1;
        let successors = node.board.neighbors();
        for board in successors {
            let seen = self
                .visited
                .as_ref()
                .is_some_and(|visited| visited.contains(&board));
            if !seen {
                self.push(board, moves, Some(current));
            }
        }
        Step::Expanded
    }

    /// Boards from the root down to `node`.
    fn path(&self, node: usize) -> Vec<Board> {
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(index) = cursor {
            let node = &self.arena[index];
            path.push(node.board.clone());
            cursor = node.previous;
        }
        path.reverse();
        path
    }
}

/// Runs A* on a board and on its twin in lockstep. Exactly one of the two can
/// reach the goal, so whichever gets there first decides solvability.
///
/// The whole search happens inside the constructor.
#[derive(Debug, Clone)]
pub struct Solver {
    initial: Board,
    solvable: bool,
    moves: u32,
    rounds: u32,
    solution: Vec<Board>,
}

impl Solver {
    pub fn new(initial: Board) -> Self {
        Self::with_options(initial, SearchOptions::default())
    }

    pub fn with_options(initial: Board, options: SearchOptions) -> Self {
        let mut main = Search::new(initial.clone(), options);
        let mut twin = Search::new(initial.twin(), options);

        let mut main_live = true;
        let mut twin_live = true;
        let mut rounds = 0;

        // Exactly one side can reach the goal. A side that runs out of boards
        // hands the verdict to the other, which keeps going alone.
        let goal = loop {
            rounds += 1;

            if main_live {
                match main.step() {
                    Step::Goal(node) => break Some(node),
                    Step::Exhausted => {
                        tracing::trace!(rounds, nodes = main.arena.len(), "initial board exhausted");
                        main_live = false;
                    }
                    Step::Expanded => {}
                }
            }

            if twin_live {
                match twin.step() {
                    Step::Goal(_) => break None,
                    Step::Exhausted => {
                        tracing::trace!(rounds, nodes = twin.arena.len(), "twin board exhausted");
                        twin_live = false;
                    }
                    Step::Expanded => {}
                }
            }

            if !main_live && !twin_live {
                tracing::warn!(rounds, "both searches exhausted without reaching the goal");
                break None;
            }
        };

        let (solvable, moves, solution) = match goal {
            Some(node) => (true, main.arena[node].moves, main.path(node)),
            None => (false, rounds, Vec::new()),
        };

        tracing::debug!(
            solvable,
            moves,
            rounds,
            main_nodes = main.arena.len(),
            twin_nodes = twin.arena.len(),
            "search finished"
        );

        Self {
            initial,
            solvable,
            moves,
            rounds,
            solution,
        }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Minimum number of slides when solvable. For an unsolvable board this is
    /// the number of rounds spent reaching that verdict, which is informational only.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Rounds of paired expansions performed before the search stopped.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Boards from the initial board to the goal, inclusive. Empty when unsolvable.
    pub fn solution(&self) -> &[Board] {
        &self.solution
    }

    /// The slides that replay `solution()` from the initial board.
    pub fn slides(&self) -> Vec<Move> {
        self.solution
            .windows(2)
            .filter_map(|pair| Move::between(&pair[0], &pair[1]))
            .collect()
    }
}
