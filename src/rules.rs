//! Capture rules.
//!
//! Every function here is pure: a board and a mover go in, cell indices come
//! out. Legality checks and capture execution share the same walk.

use once_cell::sync::Lazy;

use crate::board::{Board, NUM_SQUARES, row_col};
use crate::types::Color;

/// One of the eight adjacency steps in row-major index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    West,
    East,
    North,
    South,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub fn offset(self) -> i32 {
        match self {
            Direction::West => -1,
            Direction::East => 1,
            Direction::North => -8,
            Direction::South => 8,
            Direction::NorthWest => -9,
            Direction::NorthEast => -7,
            Direction::SouthWest => 7,
            Direction::SouthEast => 9,
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Direction::West | Direction::East)
    }

    fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Cells reachable from each origin in each direction, cut at the first
/// out-of-range or wrapping step.
static RAYS: Lazy<[[Vec<u8>; 8]; NUM_SQUARES]> = Lazy::new(|| {
    std::array::from_fn(|origin| {
        std::array::from_fn(|dir| trace_ray(origin as u8, Direction::ALL[dir]))
    })
});

fn trace_ray(origin: u8, direction: Direction) -> Vec<u8> {
    let mut ray = Vec::new();
    let mut cell = origin as i32 + direction.offset();
    while (0..NUM_SQUARES as i32).contains(&cell) && is_valid_step(origin, cell as u8, direction)
    {
        ray.push(cell as u8);
        cell += direction.offset();
    }
    ray
}

fn ray(origin: u8, direction: Direction) -> &'static [u8] {
    RAYS.get(origin as usize)
        .map(|rays| rays[direction as usize].as_slice())
        .unwrap_or(&[])
}

/// Whether `to` lies on the straight line from `from` along `direction`
/// without wrapping around a board edge.
///
/// Horizontal steps must stay on the origin's row; diagonal steps must change
/// row and column by the same amount. Vertical steps never wrap.
pub fn is_valid_step(from: u8, to: u8, direction: Direction) -> bool {
    let (from_row, from_col) = row_col(from);
    let (to_row, to_col) = row_col(to);

    if direction.is_horizontal() {
        from_row == to_row
    } else if direction.is_vertical() {
        true
    } else {
        (from_row - to_row).abs() == (from_col - to_col).abs()
    }
}

/// Opponent discs bracketed between `origin` and a `mover` disc along
/// `direction`, nearest first. Empty when the run is not closed by a mover
/// disc before an empty cell, the edge, or a wrap.
pub fn captures_in_direction(
    board: &Board,
    origin: u8,
    direction: Direction,
    mover: Color,
) -> Vec<u8> {
    let mut run = Vec::new();
    for &cell in ray(origin, direction) {
        match board.get(cell) {
            Some(color) if color == mover => return run,
            Some(_) => run.push(cell),
            None => break,
        }
    }
    Vec::new()
}

/// Union of captures over all eight directions, in ascending index order.
pub fn all_captures(board: &Board, cell: u8, mover: Color) -> Vec<u8> {
    let mut captures: Vec<u8> = Direction::ALL
        .iter()
        .flat_map(|&direction| captures_in_direction(board, cell, direction, mover))
        .collect();
    captures.sort_unstable();
    captures.dedup();
    captures
}

/// A move is legal iff the cell is empty and captures at least one disc.
pub fn is_legal(board: &Board, cell: u8, mover: Color) -> bool {
    (cell as usize) < NUM_SQUARES
        && board.is_empty_at(cell)
        && Direction::ALL
            .iter()
            .any(|&direction| !captures_in_direction(board, cell, direction, mover).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_step_from_row_end_wraps_and_is_rejected() {
        assert!(!is_valid_step(7, 8, Direction::East));
        assert!(ray(7, Direction::East).is_empty());

        let mut board = Board::empty();
        board.set(8, Some(Color::White)).unwrap();
        board.set(9, Some(Color::Black)).unwrap();

        assert!(captures_in_direction(&board, 7, Direction::East, Color::Black).is_empty());
    }

    #[test]
    fn diagonal_wrap_is_rejected() {
        // 15 is (1,7); +9 lands on (3,0).
        assert!(!is_valid_step(15, 24, Direction::SouthEast));
        // 8 is (1,0); -9 lands on (0,7).
        assert!(!is_valid_step(8, 7, Direction::NorthWest));
        assert!(is_valid_step(9, 0, Direction::NorthWest));
    }

    #[test]
    fn rays_stop_at_first_wrap() {
        // From (0,0) going north-west every step is off the board.
        assert!(ray(0, Direction::NorthWest).is_empty());
        assert_eq!(ray(0, Direction::SouthEast), &[9, 18, 27, 36, 45, 54, 63]);
        assert_eq!(ray(56, Direction::East), &[57, 58, 59, 60, 61, 62, 63]);
        // From (4,0) north-west would realign on (0,4) after wrapping; the
        // ray must already have stopped.
        assert!(ray(32, Direction::NorthWest).is_empty());
    }

    #[test]
    fn opening_capture_from_d3() {
        let board = Board::new();

        assert_eq!(
            captures_in_direction(&board, 19, Direction::South, Color::Black),
            vec![27]
        );
        assert!(captures_in_direction(&board, 19, Direction::East, Color::Black).is_empty());
        assert_eq!(all_captures(&board, 19, Color::Black), vec![27]);
        assert!(is_legal(&board, 19, Color::Black));
    }

    #[test]
    fn open_run_captures_nothing() {
        let board = Board::parse([
            "BWW.....", "........", "........", "........", "........", "........",
            "........", "........",
        ]);

        assert!(captures_in_direction(&board, 3, Direction::West, Color::White).is_empty());
        assert_eq!(
            captures_in_direction(&board, 3, Direction::West, Color::Black),
            vec![2, 1]
        );
    }

    #[test]
    fn run_ending_at_edge_captures_nothing() {
        let board = Board::parse([
            ".WWWWWWW", "........", "........", "........", "........", "........",
            "........", "........",
        ]);

        assert!(all_captures(&board, 0, Color::Black).is_empty());
        assert!(!is_legal(&board, 0, Color::Black));
    }

    #[test]
    fn captures_combine_several_directions() {
        let board = Board::parse([
            "B.B.....", "WW......", "........", "........", "........", "........",
            "........", "........",
        ]);
        // From (2,0): north captures (1,0) ending on (0,0), north-east
        // captures (1,1) ending on (0,2).
        let cell = 16;

        assert_eq!(all_captures(&board, cell, Color::Black), vec![8, 9]);
    }

    #[test]
    fn occupied_cell_is_never_legal() {
        let board = Board::new();

        assert!(!is_legal(&board, 27, Color::Black));
        assert!(!is_legal(&board, 64, Color::Black));
    }
}
