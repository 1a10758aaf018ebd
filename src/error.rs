use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be square with at least 2 rows, got {rows} rows and a row of {cols} cells")]
    InvalidShape { rows: usize, cols: usize },

    /// `value` is the first tile that is out of range or repeated.
    #[error("a {dimension}x{dimension} board must be a permutation of 0..{dimension}², found stray tile {value}")]
    InvalidPermutation { dimension: usize, value: u32 },
}
