use std::time::Duration;

const INITIAL_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(64);

/// Exponential backoff state for one batch commit.
///
/// Reset (rebuilt) for every new batch. `next_delay` yields
/// 1s, 2s, 4s, ... 64s, then `None` once the ceiling is passed,
/// at which point the caller must give up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    delay: Duration,
    max_delay: Duration,
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            delay: INITIAL_DELAY,
            max_delay: MAX_DELAY,
        }
    }

    /// Advance the state machine after a failure.
    ///
    /// Returns the delay to sleep before the next attempt, or `None` when
    /// the ceiling has been exceeded and the failure should escalate.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.delay > self.max_delay {
            return None;
        }
        let delay = self.delay;
        self.delay *= 2;
        Some(delay)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
