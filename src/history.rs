use tracing::debug;

use crate::board::Board;
use crate::engine::{Move, revert};
use crate::error::GameError;
use crate::types::Color;

/// Stack of applied moves, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    moves: Vec<Move>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Pops and reverts the last move. When that move was the automated
    /// reply (White), the human move before it is popped and reverted too, so
    /// the board always returns to a position where the human is to move.
    ///
    /// Returns the reverted moves, most recent first.
    pub fn undo_last(&mut self, board: &mut Board) -> Result<Vec<Move>, GameError> {
        let last = self.moves.pop().ok_or(GameError::EmptyHistory)?;
        revert(board, &last)?;

        let mut undone = vec![last];
        if undone[0].player == Color::White
            && let Some(previous) = self.moves.pop()
        {
            revert(board, &previous)?;
            undone.push(previous);
        }

        debug!(depth = undone.len(), "undo");
        Ok(undone)
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}
