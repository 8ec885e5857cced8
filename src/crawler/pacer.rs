//! Politeness pacing between network fetches
//!
//! The crawl runs on a single execution path, so pacing is a blocking pause
//! rather than a scheduler. The readiness arithmetic takes explicit
//! [`Instant`]s so it can be tested without wall-clock waits.

use std::time::{Duration, Instant};

/// Enforces a minimum spacing between consecutive fetches
#[derive(Debug)]
pub struct Pacer {
    min_delay: Duration,
    last_fetch: Option<Instant>,
}

impl Pacer {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_fetch: None,
        }
    }

    /// Time remaining until the next fetch is allowed; `None` means ready
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fetch?;
        let elapsed = now.duration_since(last);
        if elapsed >= self.min_delay {
            None
        } else {
            Some(self.min_delay - elapsed)
        }
    }

    /// Records that a fetch was issued
    pub fn record_fetch(&mut self, now: Instant) {
        self.last_fetch = Some(now);
    }

    /// Waits out the remaining delay (if any) and records the fetch
    pub async fn pause(&mut self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tokio::time::sleep(wait).await;
        }
        self.record_fetch(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fetch_is_immediate() {
        let pacer = Pacer::new(Duration::from_millis(500));
        assert!(pacer.time_until_ready(Instant::now()).is_none());
    }

    #[test]
    fn test_waits_out_remaining_delay() {
        let mut pacer = Pacer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        pacer.record_fetch(t0);

        let wait = pacer
            .time_until_ready(t0 + Duration::from_millis(100))
            .expect("should still be waiting");
        assert_eq!(wait, Duration::from_millis(400));
    }

    #[test]
    fn test_ready_after_delay_elapsed() {
        let mut pacer = Pacer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        pacer.record_fetch(t0);

        assert!(pacer
            .time_until_ready(t0 + Duration::from_millis(500))
            .is_none());
        assert!(pacer
            .time_until_ready(t0 + Duration::from_secs(10))
            .is_none());
    }

    #[test]
    fn test_record_resets_the_window() {
        let mut pacer = Pacer::new(Duration::from_millis(500));
        let t0 = Instant::now();
        pacer.record_fetch(t0);
        pacer.record_fetch(t0 + Duration::from_millis(500));

        // The window restarts from the second fetch
        assert!(pacer
            .time_until_ready(t0 + Duration::from_millis(600))
            .is_some());
    }
}
