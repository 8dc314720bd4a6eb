use serde::Serialize;

/// Disc colour. Black is the human side, White the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Wire encoding shared with the board array: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }
}

/// Disc counts for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Black,
    White,
    Draw,
}

impl Outcome {
    pub fn from_score(score: Score) -> Self {
        if score.black > score.white {
            Outcome::Black
        } else if score.white > score.black {
            Outcome::White
        } else {
            Outcome::Draw
        }
    }
}

/// Whose input the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingHuman,
    AwaitingCpu,
    GameOver,
}

/// Record emitted once per finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// 1-based, counted across resets.
    pub game_number: u32,
    pub black_count: u8,
    pub white_count: u8,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

/// Public game state handed to the renderer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// 64 cells, row-major: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Color,
    pub phase: Phase,
    pub black_count: u8,
    pub white_count: u8,
    pub consecutive_passes: u8,
    /// Contract:
    /// - `true` when the previous action was a pass (human or automatic).
    /// - `false` when the previous action was a placement.
    pub is_pass: bool,
    /// Cells flipped by the previous placement; empty after a pass or undo.
    pub flipped: Vec<u8>,
    pub last_move: Option<u8>,
    pub can_undo: bool,
    pub edit_mode: bool,
    pub elapsed_ms: u64,
    pub timer_running: bool,
    /// Present once the game is over.
    pub summary: Option<GameSummary>,
}

impl Snapshot {
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.black_count,
            white: self.white_count,
        }
    }
}
