use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::clock::{RunHistory, Stopwatch};
use crate::config::SessionConfig;
use crate::engine::{Move, apply_move, legal_moves};
use crate::error::GameError;
use crate::history::HistoryLog;
use crate::schedule::{Scheduler, Task, TaskQueue, Ticket};
use crate::turn::{MoveSelector, RandomSelector, TurnController};
use crate::types::{Color, GameSummary, Outcome, Phase, Score, Snapshot};

/// Human is Black, the automated opponent White.
const HUMAN: Color = Color::Black;
const CPU: Color = Color::White;

/// One game against the automated opponent, plus the record of earlier games.
///
/// Every entry point either mutates the session and returns a fresh
/// [`Snapshot`], or returns an error and leaves the session untouched.
pub struct GameSession {
    board: Board,
    turn: TurnController,
    history: HistoryLog,
    config: SessionConfig,
    selector: Box<dyn MoveSelector>,
    scheduler: Box<dyn Scheduler>,
    /// Bumped by every start/reset; stamped on scheduled tickets.
    generation: u64,
    stopwatch: Stopwatch,
    runs: RunHistory,
    summary: Option<GameSummary>,
    edit_mode: bool,
    is_pass: bool,
    flipped: Vec<u8>,
    last_move: Option<u8>,
}

impl GameSession {
    pub fn new(
        config: SessionConfig,
        selector: Box<dyn MoveSelector>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let mut session = Self {
            board: Board::new(),
            turn: TurnController::new(),
            history: HistoryLog::new(),
            config,
            selector,
            scheduler,
            generation: 0,
            stopwatch: Stopwatch::new(),
            runs: RunHistory::new(),
            summary: None,
            edit_mode: false,
            is_pass: false,
            flipped: Vec::new(),
            last_move: None,
        };
        session.start();
        session
    }

    /// Session with the random opponent and a [`TaskQueue`] the caller drives.
    pub fn with_queue(config: SessionConfig) -> (Self, TaskQueue) {
        let selector = match config.seed {
            Some(seed) => RandomSelector::from_seed(seed),
            None => RandomSelector::from_clock(),
        };
        let queue = TaskQueue::new();
        let session = Self::new(config, Box::new(selector), Box::new(queue.clone()));
        (session, queue)
    }

    /// Puts the four starting discs down and hands the move to Black.
    /// Anything scheduled before this call is invalidated.
    pub fn start(&mut self) {
        self.generation += 1;
        self.board = Board::new();
        self.turn.reset();
        self.history.clear();
        self.stopwatch.reset();
        self.summary = None;
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = None;
        debug!(generation = self.generation, "session started");
    }

    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Snapshot {
        info!("reset");
        self.start();
        self.snapshot()
    }

    /// Human click on `index`: a placement, or a recolor in edit mode.
    #[instrument(skip(self))]
    pub fn place_at(&mut self, index: u8) -> Result<Snapshot, GameError> {
        self.ensure_human_turn()?;

        if self.edit_mode {
            self.recolor(index)?;
            self.begin_timer();
            return Ok(self.snapshot());
        }

        let mv = apply_move(&mut self.board, index, HUMAN)?;
        self.begin_timer();
        self.after_placement(mv);

        if !self.turn.is_over() {
            if legal_moves(&self.board, CPU).is_empty() {
                info!("automated player has no legal move, passing");
                self.record_pass();
            } else {
                self.schedule(Task::CpuMove, self.config.cpu_delay_ms);
            }
        }
        Ok(self.snapshot())
    }

    #[instrument(skip(self))]
    pub fn pass(&mut self) -> Result<Snapshot, GameError> {
        self.ensure_human_turn()?;
        self.begin_timer();

        self.record_pass();
        if !self.turn.is_over() {
            self.schedule(Task::CpuMove, self.config.cpu_delay_ms);
        }
        Ok(self.snapshot())
    }

    /// Takes back the last human move together with the reply to it.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Snapshot, GameError> {
        self.ensure_human_turn()?;

        let undone = self.history.undo_last(&mut self.board)?;
        self.turn.restore_human();
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = self.history.last().map(|mv| mv.cell);
        info!(reverted = undone.len(), remaining = self.history.len(), "undo");
        Ok(self.snapshot())
    }

    /// Ends the game immediately, whatever the position.
    #[instrument(skip(self))]
    pub fn end_now(&mut self) -> Result<Snapshot, GameError> {
        if self.turn.is_over() {
            return Err(GameError::GameOver);
        }
        info!("game ended by request");
        self.finish();
        Ok(self.snapshot())
    }

    /// Runs a callback previously handed to the scheduler.
    #[instrument(skip(self))]
    pub fn fire(&mut self, ticket: Ticket) -> Result<Snapshot, GameError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale ticket"
            );
            return Err(GameError::StaleTicket);
        }

        match ticket.task {
            Task::CpuMove => {
                if self.turn.phase() == Phase::AwaitingCpu {
                    self.play_cpu();
                }
            }
            Task::ShowResult => {
                if let Some(summary) = self.summary {
                    info!(
                        black = summary.black_count,
                        white = summary.white_count,
                        outcome = ?summary.outcome,
                        "result"
                    );
                }
            }
        }
        Ok(self.snapshot())
    }

    pub fn toggle_edit_mode(&mut self) -> Snapshot {
        self.edit_mode = !self.edit_mode;
        info!(edit_mode = self.edit_mode, "edit mode toggled");
        self.snapshot()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Flips the colour of an existing disc. Clears the undo history, since
    /// the recorded capture sets no longer describe the board.
    pub fn recolor(&mut self, index: u8) -> Result<Snapshot, GameError> {
        self.ensure_human_turn()?;
        let color = self
            .board
            .get(index)
            .ok_or(GameError::EmptyCell(index))?;
        self.board.set(index, Some(color.opponent()))?;
        self.history.clear();
        self.flipped.clear();
        self.last_move = None;
        debug!(index, from = ?color, to = ?color.opponent(), "recolored");
        Ok(self.snapshot())
    }

    pub fn score(&self) -> Score {
        self.board.count_colors()
    }

    /// Winner of a finished game; `None` while play continues.
    pub fn outcome(&self) -> Option<Outcome> {
        self.turn
            .is_over()
            .then(|| Outcome::from_score(self.score()))
    }

    /// Legal cells for the human.
    pub fn legal_moves(&self) -> Vec<u8> {
        legal_moves(&self.board, HUMAN)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn runs(&self) -> &RunHistory {
        &self.runs
    }

    pub fn snapshot(&self) -> Snapshot {
        let score = self.score();
        Snapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.current_player(),
            phase: self.turn.phase(),
            black_count: score.black,
            white_count: score.white,
            consecutive_passes: self.turn.consecutive_passes(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.last_move,
            can_undo: !self.history.is_empty(),
            edit_mode: self.edit_mode,
            elapsed_ms: self.stopwatch.elapsed().as_millis() as u64,
            timer_running: self.stopwatch.is_running(),
            summary: self.summary,
        }
    }

    fn ensure_human_turn(&self) -> Result<(), GameError> {
        match self.turn.phase() {
            Phase::AwaitingHuman => Ok(()),
            Phase::AwaitingCpu => Err(GameError::NotHumanTurn),
            Phase::GameOver => Err(GameError::GameOver),
        }
    }

    fn begin_timer(&mut self) {
        if self.stopwatch.begin() {
            debug!("timer started");
        }
    }

    fn play_cpu(&mut self) {
        let legal = legal_moves(&self.board, CPU);
        if legal.is_empty() {
            info!("automated player has no legal move, passing");
            self.record_pass();
            return;
        }

        let cell = match self.selector.select_move(&self.board, &legal) {
            Some(cell) if legal.contains(&cell) => cell,
            other => {
                warn!(selected = ?other, "selector returned an illegal cell, using first legal move");
                legal[0]
            }
        };

        match apply_move(&mut self.board, cell, CPU) {
            Ok(mv) => self.after_placement(mv),
            Err(err) => warn!(%err, cell, "automated move rejected"),
        }
    }

    fn after_placement(&mut self, mv: Move) {
        debug!(player = ?mv.player, cell = mv.cell, captured = mv.captures.len(), "placed");
        self.turn.placed(mv.player);
        self.is_pass = false;
        self.flipped = mv.captures.clone();
        self.last_move = Some(mv.cell);
        self.history.record(mv);

        if self.board.is_full() {
            info!("board is full");
            self.finish_with_popup();
        }
    }

    fn record_pass(&mut self) {
        self.is_pass = true;
        self.flipped.clear();
        if self.turn.pass() {
            info!("both players passed in a row");
            self.finish_with_popup();
        }
    }

    fn finish_with_popup(&mut self) {
        self.finish();
        self.schedule(Task::ShowResult, self.config.result_delay_ms);
    }

    fn finish(&mut self) {
        self.turn.finish();
        let elapsed = self.stopwatch.stop();
        let score = self.score();
        let summary = GameSummary {
            game_number: self.runs.next_game_number(),
            black_count: score.black,
            white_count: score.white,
            outcome: Outcome::from_score(score),
            elapsed_ms: elapsed.as_millis() as u64,
        };
        self.runs.push(summary);
        self.summary = Some(summary);
        info!(
            game = summary.game_number,
            black = score.black,
            white = score.white,
            outcome = ?summary.outcome,
            elapsed_ms = summary.elapsed_ms,
            "game over"
        );
    }

    fn schedule(&mut self, task: Task, delay_ms: u32) {
        self.scheduler.schedule(Ticket {
            task,
            delay_ms,
            generation: self.generation,
        });
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.history.clear();
    }
}
