// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Cancellation and Deadline Token
// ─────────────────────────────────────────────────────────────────────
//! Cooperative stop signal polled at swarm-round and candidate-insertion
//! granularity. Stopping is a termination policy, not an error: whatever
//! was accepted before the stop is kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag with an optional wall-clock deadline.
///
/// Clones share the flag, so one handle can cancel a run that another
/// handle is polling.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopToken {
    /// Token that never fires unless cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that fires once `budget` has elapsed from now.
    pub fn with_deadline(budget: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + budget),
        }
    }

    /// `with_deadline` when `deadline_ms` is set, otherwise `new`.
    pub fn from_deadline_ms(deadline_ms: Option<u64>) -> Self {
        match deadline_ms {
            Some(ms) => Self::with_deadline(Duration::from_millis(ms)),
            None => Self::new(),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn is_stopped(&self) -> bool {
        self.is_cancelled() || self.deadline_passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_runs() {
        assert!(!StopToken::new().is_stopped());
    }

    #[test]
    fn test_cancel_visible_through_clone() {
        let token = StopToken::new();
        let handle = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(token.is_stopped());
    }

    #[test]
    fn test_expired_deadline() {
        let token = StopToken::with_deadline(Duration::ZERO);
        assert!(token.deadline_passed());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_far_deadline() {
        let token = StopToken::from_deadline_ms(Some(60_000));
        assert!(!token.is_stopped());
    }
}
