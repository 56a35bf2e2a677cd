use std::time::{Duration, Instant};

/// Wall-clock budget for one search. A zero budget means unlimited time,
/// which also makes the search deterministic for a given depth cap.
#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    start: Instant,
    deadline: Option<Duration>,
}

impl TimeManager {
    pub fn new(budget_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            deadline: (budget_ms > 0).then(|| Duration::from_millis(budget_ms)),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Time since the search began.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_time_up(&self) -> bool {
        match self.deadline {
            Some(deadline) => self.elapsed() >= deadline,
            None => false,
        }
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::unlimited()
    }
}
