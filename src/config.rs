use serde::Deserialize;

pub const DEFAULT_CPU_DELAY_MS: u32 = 300;
pub const DEFAULT_RESULT_DELAY_MS: u32 = 100;

/// Session settings supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause before the automated player moves.
    pub cpu_delay_ms: u32,
    /// Pause before the result popup after a natural game end.
    pub result_delay_ms: u32,
    /// Fixed seed for the random opponent; the clock is used when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cpu_delay_ms: DEFAULT_CPU_DELAY_MS,
            result_delay_ms: DEFAULT_RESULT_DELAY_MS,
            seed: None,
        }
    }
}
