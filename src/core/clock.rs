//! Injected clock abstraction
//!
//! Every timed delay in the run (scroll pauses, dwell, teardown) goes through
//! a [`Clock`] so tests can simulate time without real sleeps.

use async_trait::async_trait;
use std::time::Duration;

/// Source of timed delays
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the current task for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingClock;
    use super::*;

    #[tokio::test]
    async fn test_recording_clock_accumulates() {
        let clock = RecordingClock::default();
        clock.sleep(Duration::from_millis(100)).await;
        clock.sleep(Duration::from_millis(200)).await;
        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_slept(), Duration::from_millis(300));
    }
}
