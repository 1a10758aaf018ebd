use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;

use crate::error::BoardError;

/// Direction a tile travels when it slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Displacement of the blank as (row, col).
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The slide that turns `from` into `to`, if the two boards are one slide apart.
    pub fn between(from: &Board, to: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&m| from.slide(m).as_ref() == Some(to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable n×n arrangement of the tiles `0..n²`, with `0` as the blank.
///
/// The goal arrangement holds tile `i` at row-major position `i`, so the blank
/// belongs in the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
}

impl Board {
    /// Copies an explicit arrangement, rejecting anything that is not a square
    /// permutation of `0..n²`.
    pub fn from_tiles<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < 2 {
            let cols = rows.first().map_or(0, |row| row.as_ref().len());
            return Err(BoardError::InvalidShape { rows: size, cols });
        }
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != size) {
            return Err(BoardError::InvalidShape {
                rows: size,
                cols: row.as_ref().len(),
            });
        }

        let mut seen = vec![false; size * size];
        for &value in rows.iter().flat_map(|row| row.as_ref()) {
            match seen.get_mut(value as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(BoardError::InvalidPermutation {
                        dimension: size,
                        value,
                    })
                }
            }
        }

        let flattened = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Ok(Self::from_flattened(size, flattened))
    }

    pub fn goal(size: usize) -> Result<Self, BoardError> {
        check_dimension(size)?;
        Ok(Self::from_flattened(size, (0..(size * size) as u32).collect()))
    }

    /// Uniformly shuffled board seeded from the thread-local generator.
    pub fn random(size: usize) -> Result<Self, BoardError> {
        Self::random_with(size, &mut thread_rng())
    }

    pub fn random_with<G: Rng + ?Sized>(size: usize, rng: &mut G) -> Result<Self, BoardError> {
        check_dimension(size)?;
        let mut flattened: Vec<u32> = (0..(size * size) as u32).collect();
        flattened.shuffle(rng);
        Ok(Self::from_flattened(size, flattened))
    }

    // Callers guarantee `flattened` is a permutation of 0..size².
    fn from_flattened(size: usize, flattened: Vec<u32>) -> Self {
        let tiles: Vec<Vec<u32>> = flattened.chunks(size).map(<[u32]>::to_vec).collect();
        let blank = flattened.iter().position(|&tile| tile == 0).unwrap_or(0);

        Self {
            size,
            tiles,
            blank_row: blank / size,
            blank_col: blank % size,
        }
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row][col]
    }

    /// (row, col) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    fn flattened(&self) -> impl Iterator<Item = u32> + '_ {
        self.tiles.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of tiles out of place. The blank never counts.
    pub fn hamming(&self) -> u32 {
        self.flattened()
            .enumerate()
            .filter(|&(i, tile)| tile != 0 && tile as usize != i)
            .count() as u32
    }

    /// Sum of every tile's row and column distance to its goal cell, blank excluded.
    pub fn manhattan(&self) -> u32 {
        let mut distance = 0;
        for (i, row) in self.tiles.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != 0 {
                    let target_row = value as usize / self.size;
                    let target_col = value as usize % self.size;
                    distance += i.abs_diff(target_row) + j.abs_diff(target_col);
                }
            }
        }
        distance as u32
    }

    pub fn is_goal(&self) -> bool {
        self.flattened()
            .enumerate()
            .all(|(i, tile)| tile as usize == i)
    }

    /// The board after sliding one tile into the blank, or `None` when no tile
    /// sits on that side of it.
    pub fn slide(&self, movement: Move) -> Option<Board> {
        let (dx, dy) = movement.as_offset();

        let new_x = self.blank_row.checked_add_signed(dx)?;
        let new_y = self.blank_col.checked_add_signed(dy)?;
        if new_x >= self.size || new_y >= self.size {
            return None;
        }

        let mut next = self.clone();
        next.tiles[self.blank_row][self.blank_col] = self.tiles[new_x][new_y];
        next.tiles[new_x][new_y] = 0;
        next.blank_row = new_x;
        next.blank_col = new_y;
        Some(next)
    }

    /// Every board one slide away, in `Move::ALL` order.
    pub fn neighbors(&self) -> Vec<Board> {
        Move::ALL
            .into_iter()
            .filter_map(|m| self.slide(m))
            .collect()
    }

    /// Swaps the first two tiles of the top row, or of the second row when
    /// the blank is in the top row. The result has the opposite solvability.
    pub fn twin(&self) -> Board {
        let row = if self.blank_row == 0 { 1 } else { 0 };
        let mut twin = self.clone();
        twin.tiles[row].swap(0, 1);
        twin
    }
}

fn check_dimension(size: usize) -> Result<(), BoardError> {
    if size < 2 {
        return Err(BoardError::InvalidShape {
            rows: size,
            cols: size,
        });
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.size * self.size - 1).to_string().len();
        let separator = "-".repeat(self.size * (2 + digits) + self.size + 1);

        for row in &self.tiles {
            writeln!(f, "{}", separator)?;
            write!(f, "|")?;
            for &value in row {
                if value == 0 {
                    write!(f, " {:digits$} |", "")?;
                } else {
                    write!(f, " {:0digits$} |", value)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u32; 3]]) -> Board {
        Board::from_tiles(rows).unwrap()
    }

    #[test]
    fn sorted_board_is_goal() {
        assert!(board(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]).is_goal());
        assert!(Board::goal(4).unwrap().is_goal());
        assert!(!board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]).is_goal());
    }

    #[test]
    fn hamming_ignores_the_blank() {
        let b = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(b.hamming(), 1);

        let b = board(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]);
        assert_eq!(b.hamming(), 7);
    }

    #[test]
    fn manhattan_sums_tile_distances() {
        // tile 1 sits one column left of its goal cell
        let b = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(b.manhattan(), 1);

        // 8:4 1:0 3:3 4:1 2:1 7:1 6:1 5:1
        let b = board(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]);
        assert_eq!(b.manhattan(), 12);
    }

    #[test]
    fn neighbor_count_depends_on_blank_position() {
        let corner = board(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let edge = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let interior = board(&[[1, 4, 2], [3, 0, 5], [6, 7, 8]]);

        assert_eq!(corner.neighbors().len(), 2);
        assert_eq!(edge.neighbors().len(), 3);
        assert_eq!(interior.neighbors().len(), 4);
    }

    #[test]
    fn neighbors_swap_blank_with_one_adjacent_tile() {
        let b = board(&[[1, 4, 2], [3, 0, 5], [6, 7, 8]]);
        for next in b.neighbors() {
            let (r, c) = next.blank();
            assert_eq!(r.abs_diff(1) + c.abs_diff(1), 1);
            assert_eq!(next.tile(1, 1), b.tile(r, c));

            let differing = (0..3)
                .flat_map(|i| (0..3).map(move |j| (i, j)))
                .filter(|&(i, j)| next.tile(i, j) != b.tile(i, j))
                .count();
            assert_eq!(differing, 2);
        }
    }

    #[test]
    fn slide_off_the_edge_is_rejected() {
        let b = board(&[[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert!(b.slide(Move::Down).is_none());
        assert!(b.slide(Move::Right).is_none());

        let up = b.slide(Move::Up).unwrap();
        assert_eq!(up.blank(), (1, 0));
        assert_eq!(up.tile(0, 0), 3);
        assert_eq!(Move::between(&b, &up), Some(Move::Up));
        assert_eq!(Move::between(&up, &b), Some(Move::Down));
        assert_eq!(Move::between(&b, &b), None);
    }

    #[test]
    fn twin_never_moves_the_blank() {
        let top = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let twin = top.twin();
        assert_eq!(twin.blank(), top.blank());
        assert_eq!(twin.tile(1, 0), 4);
        assert_eq!(twin.tile(1, 1), 3);

        let low = board(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        let twin = low.twin();
        assert_eq!(twin.tile(0, 0), 2);
        assert_eq!(twin.tile(0, 1), 1);
        assert_eq!(twin.blank(), (2, 2));
    }

    #[test]
    fn rejects_non_square_arrangements() {
        let ragged: Vec<Vec<u32>> = vec![vec![0, 1, 2], vec![3, 4], vec![5, 6, 7]];
        assert_eq!(
            Board::from_tiles(&ragged),
            Err(BoardError::InvalidShape { rows: 3, cols: 2 })
        );

        let wide: Vec<Vec<u32>> = vec![vec![0, 1, 2], vec![3, 4, 5]];
        assert_eq!(
            Board::from_tiles(&wide),
            Err(BoardError::InvalidShape { rows: 2, cols: 3 })
        );

        assert!(matches!(
            Board::from_tiles(&[[0u32]]),
            Err(BoardError::InvalidShape { .. })
        ));
        assert!(Board::goal(1).is_err());
        assert!(Board::random(0).is_err());
    }

    #[test]
    fn rejects_repeated_or_out_of_range_tiles() {
        assert_eq!(
            Board::from_tiles(&[[0u32, 1], [1, 2]]),
            Err(BoardError::InvalidPermutation {
                dimension: 2,
                value: 1
            })
        );
        assert_eq!(
            Board::from_tiles(&[[0u32, 1], [2, 4]]),
            Err(BoardError::InvalidPermutation {
                dimension: 2,
                value: 4
            })
        );
    }

    #[test]
    fn random_board_is_a_permutation() {
        let b = Board::random(4).unwrap();
        let mut values: Vec<u32> = b.flattened().collect();
        values.sort_unstable();
        assert_eq!(values, (0..16).collect::<Vec<_>>());
        assert_eq!(b.tile(b.blank().0, b.blank().1), 0);
    }

    #[test]
    fn renders_bordered_grid() {
        let b = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let expected = "\
-------------
| 1 |   | 2 |
-------------
| 3 | 4 | 5 |
-------------
| 6 | 7 | 8 |
-------------";
        assert_eq!(b.to_string(), expected);
    }

    #[test]
    fn renders_wide_labels_zero_padded() {
        let b = Board::goal(4).unwrap();
        let rendered = b.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "-".repeat(21));
        assert_eq!(lines[1], "|    | 01 | 02 | 03 |");
        assert_eq!(lines[7], "| 12 | 13 | 14 | 15 |");
        assert_eq!(lines.len(), 9);
    }
}
