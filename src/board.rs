use crate::error::GameError;
use crate::types::{Color, Score};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Starting layout: d4=white, e4=black, d5=black, e5=white.
const INITIAL_DISCS: [(u8, Color); 4] = [
    (27, Color::White),
    (28, Color::Black),
    (35, Color::Black),
    (36, Color::White),
];

/// Reversi board as 64 row-major cells.
///
/// The board only checks bounds; game rules live in `rules` and `engine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Color>; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board with the four centre discs.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (index, color) in INITIAL_DISCS {
            board.cells[index as usize] = Some(color);
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    pub fn from_cells(cells: [Option<Color>; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// Occupant of `index`; out-of-range cells read as empty.
    pub fn get(&self, index: u8) -> Option<Color> {
        self.cells.get(index as usize).copied().flatten()
    }

    pub fn set(&mut self, index: u8, cell: Option<Color>) -> Result<(), GameError> {
        let slot = self
            .cells
            .get_mut(index as usize)
            .ok_or(GameError::OutOfBounds(index))?;
        *slot = cell;
        Ok(())
    }

    pub fn is_empty_at(&self, index: u8) -> bool {
        self.get(index).is_none()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn count_colors(&self) -> Score {
        self.cells.iter().flatten().fold(Score::default(), |mut score, color| {
            match color {
                Color::Black => score.black += 1,
                Color::White => score.white += 1,
            }
            score
        })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.cells.iter().filter(|cell| cell.is_none()).count() as u8
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (out, cell) in board.iter_mut().zip(self.cells.iter()) {
            *out = cell.map_or(0, Color::code);
        }
        board
    }

    /// Iterates the indices of all empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index as u8)
    }

    /// Builds a board from eight rows of `.`, `B`, `W`.
    #[cfg(test)]
    pub(crate) fn parse(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), BOARD_SIZE, "row {row} must have 8 cells");
            for (col, ch) in line.chars().enumerate() {
                board.cells[row * BOARD_SIZE + col] = match ch {
                    'B' => Some(Color::Black),
                    'W' => Some(Color::White),
                    '.' => None,
                    other => panic!("unexpected cell {other:?}"),
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// `(row, col)` of a cell index.
pub fn row_col(index: u8) -> (i32, i32) {
    let index = index as usize;
    ((index / BOARD_SIZE) as i32, (index % BOARD_SIZE) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> u8 {
        (row * BOARD_SIZE + col) as u8
    }

    #[test]
    fn initial_board_has_four_centre_discs() {
        let board = Board::new();

        let occupied: Vec<u8> = (0..NUM_SQUARES as u8)
            .filter(|&i| board.get(i).is_some())
            .collect();

        assert_eq!(occupied, vec![27, 28, 35, 36]);
        assert_eq!(board.get(idx(3, 3)), Some(Color::White));
        assert_eq!(board.get(idx(3, 4)), Some(Color::Black));
        assert_eq!(board.get(idx(4, 3)), Some(Color::Black));
        assert_eq!(board.get(idx(4, 4)), Some(Color::White));
        assert_eq!(board.count_colors(), Score { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 60);
        assert!(!board.is_full());
    }

    #[test]
    fn set_rejects_out_of_range_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        assert_eq!(
            board.set(64, Some(Color::Black)),
            Err(GameError::OutOfBounds(64))
        );
        assert_eq!(board, before);
        assert_eq!(board.get(200), None);
    }

    #[test]
    fn full_board_is_detected_and_counted() {
        let mut cells = [Some(Color::White); NUM_SQUARES];
        for cell in cells.iter_mut().take(40) {
            *cell = Some(Color::Black);
        }
        let board = Board::from_cells(cells);

        assert!(board.is_full());
        assert_eq!(board.count_colors(), Score { black: 40, white: 24 });
        assert_eq!(board.empty_cells().count(), 0);
    }

    #[test]
    fn to_array_encodes_cells() {
        let cells = Board::new().to_array();

        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[0], 0);
        assert_eq!(cells.iter().filter(|&&c| c != 0).count(), 4);
    }

    #[test]
    fn parse_reads_rows_top_to_bottom() {
        let board = Board::parse([
            "B.......", "........", "........", "........", "........", "........",
            "........", ".......W",
        ]);

        assert_eq!(board.get(0), Some(Color::Black));
        assert_eq!(board.get(63), Some(Color::White));
        assert_eq!(row_col(63), (7, 7));
    }
}
