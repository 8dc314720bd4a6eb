use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::board::Board;
use crate::types::{Color, Phase};

/// Passes in a row, without a placement in between, that end the game.
pub const PASSES_TO_END: u8 = 2;

/// Picks the automated player's move from the legal candidates.
pub trait MoveSelector {
    /// `legal` is non-empty and ascending. Returning a cell outside it is
    /// tolerated by the session, which then falls back to `legal[0]`.
    fn select_move(&mut self, board: &Board, legal: &[u8]) -> Option<u8>;
}

/// Uniformly random choice among legal moves.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: SmallRng,
}

impl RandomSelector {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed(seed)
    }
}

impl MoveSelector for RandomSelector {
    fn select_move(&mut self, _board: &Board, legal: &[u8]) -> Option<u8> {
        if legal.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..legal.len());
        legal.get(pick).copied()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, _board: &Board, legal: &[u8]) -> Option<u8> {
        legal.first().copied()
    }
}

/// Side to move and the running pass streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: Color,
    pub consecutive_passes: u8,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current_player: Color::Black,
            consecutive_passes: 0,
        }
    }
}

/// Turn state machine: Black is the human, White the automated player.
///
/// Human passes and automatic passes share one counter; any placement resets
/// it and [`PASSES_TO_END`] in a row is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    state: TurnState,
    phase: Phase,
}

impl TurnController {
    pub fn new() -> Self {
        Self {
            state: TurnState::default(),
            phase: Phase::AwaitingHuman,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn current_player(&self) -> Color {
        self.state.current_player
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.state.consecutive_passes
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// `mover` placed a disc; the other side is up.
    pub fn placed(&mut self, mover: Color) {
        if self.is_over() {
            return;
        }
        self.state.consecutive_passes = 0;
        self.hand_over(mover.opponent());
    }

    /// The side to move passed. Returns `true` when the pass ended the game.
    pub fn pass(&mut self) -> bool {
        if self.is_over() {
            return true;
        }
        self.state.consecutive_passes = self.state.consecutive_passes.saturating_add(1);
        debug!(
            player = ?self.state.current_player,
            passes = self.state.consecutive_passes,
            "pass"
        );
        self.hand_over(self.state.current_player.opponent());
        if self.state.consecutive_passes >= PASSES_TO_END {
            self.finish();
        }
        self.is_over()
    }

    /// Back to the human after an undo.
    pub fn restore_human(&mut self) {
        self.state = TurnState::default();
        self.phase = Phase::AwaitingHuman;
    }

    pub fn finish(&mut self) {
        self.phase = Phase::GameOver;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn hand_over(&mut self, next: Color) {
        self.state.current_player = next;
        self.phase = match next {
            Color::Black => Phase::AwaitingHuman,
            Color::White => Phase::AwaitingCpu,
        };
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_hands_turn_over_and_clears_passes() {
        let mut turn = TurnController::new();
        turn.pass();
        assert_eq!(turn.phase(), Phase::AwaitingCpu);
        assert_eq!(turn.consecutive_passes(), 1);

        turn.placed(Color::White);

        assert_eq!(turn.phase(), Phase::AwaitingHuman);
        assert_eq!(turn.current_player(), Color::Black);
        assert_eq!(turn.consecutive_passes(), 0);
    }

    #[test]
    fn two_passes_in_a_row_end_the_game() {
        let mut turn = TurnController::new();

        assert!(!turn.pass());
        assert!(turn.pass());
        assert_eq!(turn.phase(), Phase::GameOver);
    }

    #[test]
    fn passes_separated_by_placement_do_not_end_the_game() {
        let mut turn = TurnController::new();

        turn.pass();
        turn.placed(Color::White);
        assert!(!turn.pass());
        assert_eq!(turn.phase(), Phase::AwaitingCpu);
    }

    #[test]
    fn game_over_is_terminal() {
        let mut turn = TurnController::new();
        turn.finish();

        turn.placed(Color::Black);

        assert_eq!(turn.phase(), Phase::GameOver);
        assert_eq!(turn.consecutive_passes(), 0);
    }

    #[test]
    fn seeded_random_selector_is_deterministic_and_legal() {
        let board = Board::new();
        let legal = [20, 29, 34, 43];
        let mut a = RandomSelector::from_seed(7);
        let mut b = RandomSelector::from_seed(7);

        for _ in 0..32 {
            let pick = a.select_move(&board, &legal);
            assert_eq!(pick, b.select_move(&board, &legal));
            assert!(legal.contains(&pick.unwrap()));
        }
        assert_eq!(a.select_move(&board, &[]), None);
    }

    #[test]
    fn random_selector_reaches_every_candidate() {
        let board = Board::new();
        let legal = [20, 29, 34, 43];
        let mut selector = RandomSelector::from_seed(42);
        let mut seen = [false; 4];

        for _ in 0..400 {
            let pick = selector.select_move(&board, &legal).unwrap();
            let slot = legal.iter().position(|&cell| cell == pick).unwrap();
            seen[slot] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn first_legal_selector_takes_lowest_cell() {
        let mut selector = FirstLegalMoveSelector;

        assert_eq!(selector.select_move(&Board::new(), &[20, 29]), Some(20));
        assert_eq!(selector.select_move(&Board::new(), &[]), None);
    }
}
