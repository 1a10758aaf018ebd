//! Optimal solver for the n×n sliding-tile puzzle.
//!
//! [`Solver`] runs A* with the Manhattan heuristic on a board and on its
//! [`Board::twin`] at the same time. Only one of the two can reach the goal,
//! which settles solvability without a parity argument.

pub mod board;
pub mod config;
pub mod error;
pub mod solver;

pub use board::{Board, Move};
pub use error::BoardError;
pub use solver::{SearchOptions, Solver};
