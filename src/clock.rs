use std::time::Duration;

use web_time::Instant;

use crate::types::GameSummary;

/// Wall-clock time spent on one game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    frozen: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing unless already running. Returns `true` when this call
    /// started it.
    pub fn begin(&mut self) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.frozen = Duration::ZERO;
        self.started_at = Some(Instant::now());
        true
    }

    /// Stops timing and returns the total elapsed time.
    pub fn stop(&mut self) -> Duration {
        if let Some(started_at) = self.started_at.take() {
            self.frozen = started_at.elapsed();
        }
        self.frozen
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map_or(self.frozen, |started_at| started_at.elapsed())
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Summaries of finished games, oldest first. Survives session resets.
#[derive(Debug, Clone, Default)]
pub struct RunHistory {
    runs: Vec<GameSummary>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next finished game will get.
    pub fn next_game_number(&self) -> u32 {
        self.runs.len() as u32 + 1
    }

    pub fn push(&mut self, summary: GameSummary) {
        self.runs.push(summary);
    }

    pub fn last(&self) -> Option<&GameSummary> {
        self.runs.last()
    }

    pub fn as_slice(&self) -> &[GameSummary] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
