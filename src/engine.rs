use serde::Serialize;

use crate::board::{Board, NUM_SQUARES};
use crate::error::GameError;
use crate::rules::{all_captures, is_legal};
use crate::types::Color;

/// A placement that has been applied to a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub cell: u8,
    /// Flipped discs in ascending order.
    pub captures: Vec<u8>,
    pub player: Color,
}

/// Places a `mover` disc on `cell` and flips every captured disc.
///
/// Fails with `IllegalMove` when the cell is occupied or captures nothing;
/// the board is untouched in that case.
pub fn apply_move(board: &mut Board, cell: u8, mover: Color) -> Result<Move, GameError> {
    if cell as usize >= NUM_SQUARES {
        return Err(GameError::OutOfBounds(cell));
    }
    if !board.is_empty_at(cell) {
        return Err(GameError::IllegalMove(cell));
    }

    let captures = all_captures(board, cell, mover);
    if captures.is_empty() {
        return Err(GameError::IllegalMove(cell));
    }

    board.set(cell, Some(mover))?;
    for &captured in &captures {
        board.set(captured, Some(mover))?;
    }

    Ok(Move {
        cell,
        captures,
        player: mover,
    })
}

/// Empty cells where `color` would capture at least one disc, ascending.
pub fn legal_moves(board: &Board, color: Color) -> Vec<u8> {
    board
        .empty_cells()
        .filter(|&cell| is_legal(board, cell, color))
        .collect()
}

/// Undoes `mv`: clears its cell and hands the captured discs back.
///
/// Exact inverse of `apply_move` as long as moves are reverted in LIFO order.
pub fn revert(board: &mut Board, mv: &Move) -> Result<(), GameError> {
    board.set(mv.cell, None)?;
    let previous_owner = mv.player.opponent();
    for &captured in &mv.captures {
        board.set(captured, Some(previous_owner))?;
    }
    Ok(())
}
