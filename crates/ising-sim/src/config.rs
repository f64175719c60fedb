use std::time::Duration;

/// Default frame cadence, roughly 30 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 0x15_1A_6E;

/// Clock-level settings fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Minimum wall time between two emitted frames.
    pub frame_interval: Duration,
    /// Seed for the lattice RNG; equal seeds give identical synchronous runs.
    pub seed:           u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { frame_interval: DEFAULT_FRAME_INTERVAL, seed: DEFAULT_SEED }
    }
}

impl ClockConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}
