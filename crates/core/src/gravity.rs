//! Fixed-interval gravity timer.
//!
//! Timestamps are milliseconds from any monotonic clock; only differences matter.

use crate::types::FALL_INTERVAL_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityScheduler {
    interval_ms: u64,
    last_fall_ms: u64,
}

impl GravityScheduler {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fall_ms: 0,
        }
    }

    /// Start counting from `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.last_fall_ms = now_ms;
    }

    /// True once at least one interval has elapsed since the last fall attempt.
    ///
    /// A clock that goes backwards reads as no time elapsed.
    pub fn due_for_fall(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fall_ms) >= self.interval_ms
    }

    /// Record a fall attempt, successful or not.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_fall_ms = now_ms;
    }
}

impl Default for GravityScheduler {
    fn default() -> Self {
        Self::new(FALL_INTERVAL_MS as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_after_interval() {
        let mut gravity = GravityScheduler::default();
        gravity.arm(1_000);
        assert!(!gravity.due_for_fall(1_000));
        assert!(!gravity.due_for_fall(1_699));
        assert!(gravity.due_for_fall(1_700));
        assert!(gravity.due_for_fall(5_000));
    }

    #[test]
    fn reset_restarts_interval() {
        let mut gravity = GravityScheduler::new(100);
        gravity.arm(0);
        assert!(gravity.due_for_fall(130));
        gravity.reset(130);
        assert!(!gravity.due_for_fall(229));
        assert!(gravity.due_for_fall(230));
    }

    #[test]
    fn clock_going_backwards_is_not_due() {
        let mut gravity = GravityScheduler::new(100);
        gravity.arm(500);
        assert!(!gravity.due_for_fall(10));
    }
}
