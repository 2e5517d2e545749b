//! Frame clock shared between the consumer tick and backend workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tick counter driving the "just pressed/released" windows.
///
/// There is exactly one writer (the host tick, via [`FrameClock::advance`])
/// and any number of readers. Cloning yields a handle to the same counter;
/// the clock survives backend swaps while the state tables do not.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame: Arc<AtomicU64>,
}

impl FrameClock {
    /// Create a clock starting at frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame, returning the new value.
    pub fn advance(&self) -> u64 {
        self.frame.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The current frame number.
    pub fn current(&self) -> u64 {
        self.frame.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let clock = FrameClock::new();
        assert_eq!(clock.current(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.current(), 2);
    }

    #[test]
    fn test_clones_share_the_counter() {
        let clock = FrameClock::new();
        let handle = clock.clone();
        clock.advance();
        handle.advance();
        assert_eq!(clock.current(), 2);
        assert_eq!(handle.current(), 2);
    }
}
