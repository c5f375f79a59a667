//! Outbound call pacing.
//!
//! Every rate-limited network call waits a fixed minimum delay first, and
//! rate-limit responses trigger a longer backoff. Modeled as an explicit
//! value wrapping an injectable [`Sleeper`] so the behavior is testable
//! with a recording fake instead of real time.
//!
//! Inline review and the summary pass share one `Pacer`, i.e. one per-run
//! budget against the hosting and model APIs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Sleep capability, injectable for tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Enforces the inter-call delay and rate-limit backoffs.
#[derive(Clone)]
pub struct Pacer {
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl Pacer {
    /// Create a pacer with the given inter-call delay, using real time.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Create a pacer with an explicit sleeper (tests).
    pub fn with_sleeper(delay: Duration, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { delay, sleeper }
    }

    /// Wait the standard delay before an outbound call.
    pub async fn pause(&self) {
        self.sleeper.sleep(self.delay).await;
    }

    /// Wait a longer, caller-chosen interval after a rate-limit signal.
    pub async fn backoff(&self, duration: Duration) {
        self.sleeper.sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records requested sleep durations instead of sleeping.
    pub struct RecordingSleeper {
        pub slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self {
                slept: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    #[tokio::test]
    async fn pause_uses_configured_delay() {
        let sleeper = Arc::new(RecordingSleeper::new());
        let pacer = Pacer::with_sleeper(Duration::from_secs(2), sleeper.clone());

        pacer.pause().await;
        pacer.pause().await;

        let slept = sleeper.slept.lock().unwrap();
        assert_eq!(*slept, vec![Duration::from_secs(2), Duration::from_secs(2)]);
    }

    #[tokio::test]
    async fn backoff_uses_caller_interval() {
        let sleeper = Arc::new(RecordingSleeper::new());
        let pacer = Pacer::with_sleeper(Duration::from_secs(2), sleeper.clone());

        pacer.backoff(Duration::from_secs(10)).await;

        let slept = sleeper.slept.lock().unwrap();
        assert_eq!(*slept, vec![Duration::from_secs(10)]);
    }

    #[tokio::test]
    async fn zero_delay_pacer_still_calls_sleeper() {
        let sleeper = Arc::new(RecordingSleeper::new());
        let pacer = Pacer::with_sleeper(Duration::ZERO, sleeper.clone());

        pacer.pause().await;

        assert_eq!(sleeper.slept.lock().unwrap().len(), 1);
    }
}
