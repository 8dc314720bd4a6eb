use thiserror::Error;

/// Reasons a session operation was rejected.
///
/// None of these are fatal: the session is left exactly as it was before the
/// call, and the caller is free to ignore the error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Placement on an occupied cell, or on a cell that captures nothing.
    #[error("illegal move at cell {0}")]
    IllegalMove(u8),

    #[error("cell {0} is outside the board")]
    OutOfBounds(u8),

    /// Human input arrived while the automated player is to move.
    #[error("it is not the player's turn")]
    NotHumanTurn,

    #[error("game is already over")]
    GameOver,

    #[error("no move to undo")]
    EmptyHistory,

    /// A scheduled callback outlived the session generation it was issued for.
    #[error("ticket belongs to an earlier game")]
    StaleTicket,

    /// Edit mode can only recolor existing discs.
    #[error("cell {0} is empty")]
    EmptyCell(u8),
}
