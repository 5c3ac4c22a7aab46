//! Fixed-interval polling with a hard ceiling
//!
//! No backoff and no retry on errors: a failed sample ends the poll.

use crate::model::PollPolicy;
use std::future::Future;
use tokio::time::sleep;

/// Result of a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The predicate held for this sample
    Ready(T),
    /// Budget exhausted; carries the last sample seen
    TimedOut(T),
}

impl<T> PollOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready(_))
    }

    /// The sample regardless of outcome
    pub fn into_inner(self) -> T {
        match self {
            PollOutcome::Ready(v) | PollOutcome::TimedOut(v) => v,
        }
    }
}

/// Sample with `fetch` until `is_ready` holds or `policy.max_attempts()` samples were taken
///
/// Sleeps `policy.interval` between samples, never after the last one.
pub async fn poll_until<T, E, F, Fut, P>(
    policy: &PollPolicy,
    mut fetch: F,
    mut is_ready: P,
) -> std::result::Result<PollOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        let sample = fetch().await?;
        if is_ready(&sample) {
            tracing::debug!("Ready after {} sample(s)", attempt);
            return Ok(PollOutcome::Ready(sample));
        }

        if attempt >= max_attempts {
            tracing::warn!("Gave up after {} sample(s)", attempt);
            return Ok(PollOutcome::TimedOut(sample));
        }

        sleep(policy.interval).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_third_sample() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = tokio::time::Instant::now();

        let outcome = poll_until(
            &PollPolicy::default(),
            move || async move { Ok::<_, ()>(counter.fetch_add(1, Ordering::SeqCst) + 1) },
            |n| *n == 3,
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Ready(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // two sleeps between three samples
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_last_sample() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let outcome = poll_until(
            &PollPolicy::default(),
            move || async move { Ok::<_, ()>(counter.fetch_add(1, Ordering::SeqCst) + 1) },
            |_| false,
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::TimedOut(40));
        assert!(!outcome.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_aborts_without_retry() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result = poll_until(
            &PollPolicy::default(),
            move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n == 2 { Err("boom") } else { Ok(n) }
            },
            |_| false,
        )
        .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_budget() {
        let policy = PollPolicy::new(Duration::from_secs(15), Duration::from_secs(5));
        let outcome = poll_until(&policy, || async { Ok::<_, ()>("creating") }, |s| {
            *s == "available"
        })
        .await
        .unwrap();

        assert_eq!(outcome.into_inner(), "creating");
    }
}
