//! Sliding-window admission control for outbound submissions.
//!
//! Implements a true sliding window: the timestamps of recent grants are
//! kept in a queue, entries older than the window are purged lazily, and a
//! new grant is recorded only while capacity remains. There are no
//! background tasks and no per-grant timers; expiry is observed by whoever
//! looks next.
//!
//! # Thread safety
//!
//! State lives behind a `std::sync::Mutex` held only inside synchronous
//! blocks. The purge, the capacity check, and the append happen atomically
//! under the lock; the lock is never held across an `await`. Callers that
//! find the window full compute the wake deadline under the lock, release
//! it, and sleep outside.
//!
//! # Cancellation
//!
//! [`RateLimiter::acquire`] records its grant in the same poll that
//! completes, so dropping the future while it waits leaves the recorded
//! grant sequence unchanged. No slot is leaked and nothing needs to be
//! refunded.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::ClientError;

/// Sliding-window rate limiter: at most `max_requests` grants inside any
/// rolling interval of `window`.
///
/// Shared across tasks behind an `Arc`; all methods take `&self`.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    grants: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` grants per `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `max_requests` is zero
    /// or `window` is zero.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, ClientError> {
        if max_requests == 0 {
            return Err(ClientError::configuration(
                "max_requests",
                "must be positive",
            ));
        }
        if window.is_zero() {
            return Err(ClientError::configuration("window", "must be positive"));
        }
        Ok(Self {
            max_requests,
            window,
            grants: Mutex::new(VecDeque::with_capacity(max_requests as usize)),
        })
    }

    /// Waits until the sliding window has room, then records a grant.
    ///
    /// Returns as soon as capacity is available; under capacity this is
    /// immediate. While the window is full the calling task suspends until
    /// the oldest recorded grant leaves the window, then re-checks, since
    /// another caller may have taken the slot in the meantime.
    pub async fn acquire(&self) {
        loop {
            let (deadline, wait) = {
                let mut grants = self
                    .grants
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                let now = Instant::now();
                Self::purge(&mut grants, now, self.window);

                if grants.len() < self.max_requests as usize {
                    grants.push_back(now);
                    return;
                }

                // Full. The oldest grant decides when the next slot opens.
                let deadline = grants
                    .front()
                    .map_or(now, |&oldest| oldest + self.window);
                (deadline, deadline.duration_since(now))
            };

            tracing::debug!(
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "submission window full; waiting for a slot"
            );
            tokio::time::sleep_until(deadline).await;
        }
    }

    /// Returns how many grants currently sit inside the window.
    ///
    /// Purges expired entries first, so the count reflects this instant.
    #[must_use]
    pub fn grants_in_window(&self) -> usize {
        let mut grants = self
            .grants
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Self::purge(&mut grants, Instant::now(), self.window);
        grants.len()
    }

    /// Drops queue entries that have aged out of the window. An entry
    /// exactly `window` old is expired: its slot opens at `t + window`,
    /// not after.
    fn purge(grants: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while grants
            .front()
            .is_some_and(|&oldest| now.duration_since(oldest) >= window)
        {
            grants.pop_front();
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::{sleep, timeout, Instant};

    use super::RateLimiter;
    use crate::error::ClientError;

    #[test]
    fn test_rejects_zero_capacity() {
        let result = RateLimiter::new(0, Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(ClientError::Configuration { field, .. }) if field == "max_requests"
        ));
    }

    #[test]
    fn test_rejects_zero_window() {
        let result = RateLimiter::new(5, Duration::ZERO);
        assert!(matches!(
            result,
            Err(ClientError::Configuration { field, .. }) if field == "window"
        ));
    }

    #[tokio::test]
    async fn test_fast_path_under_capacity() {
        let limiter = RateLimiter::new(5, Duration::from_secs(1)).unwrap();
        let start = Instant::now();

        for _ in 0..5 {
            limiter.acquire().await;
        }

        assert!(
            start.elapsed() < Duration::from_millis(100),
            "under-capacity acquires should not wait, took {:?}",
            start.elapsed()
        );
        assert_eq!(limiter.grants_in_window(), 5);
    }

    #[tokio::test]
    async fn test_second_call_waits_for_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(1000)).unwrap();
        let start = Instant::now();

        limiter.acquire().await;
        sleep(Duration::from_millis(10)).await;
        limiter.acquire().await;

        assert!(
            start.elapsed() >= Duration::from_millis(900),
            "second grant should wait out the window, took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_third_call_waits_relative_to_first_grant() {
        let limiter = RateLimiter::new(2, Duration::from_millis(1000)).unwrap();
        let start = Instant::now();

        limiter.acquire().await;
        sleep(Duration::from_millis(300)).await;
        limiter.acquire().await;
        limiter.acquire().await;

        let elapsed = start.elapsed();
        // The slot opens one window after the first grant, not the second.
        assert!(
            elapsed >= Duration::from_millis(900),
            "third grant came too early: {elapsed:?}"
        );
        assert!(
            elapsed < Duration::from_millis(1280),
            "third grant should track the first grant's expiry, took {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_capacity_plus_one_spans_the_window() {
        let limiter = RateLimiter::new(3, Duration::from_millis(500)).unwrap();
        let start = Instant::now();

        for _ in 0..4 {
            limiter.acquire().await;
        }

        assert!(
            start.elapsed() >= Duration::from_millis(500),
            "four grants at capacity three must span the window, took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sliding_window_under_concurrent_stress() {
        let limiter = Arc::new(RateLimiter::new(3, Duration::from_millis(300)).unwrap());
        let completions = Arc::new(std::sync::Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..12)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let completions = Arc::clone(&completions);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    completions.lock().unwrap().push(Instant::now());
                })
            })
            .collect();

        // Every waiter must finish: liveness.
        for handle in handles {
            timeout(Duration::from_secs(10), handle)
                .await
                .expect("waiter starved")
                .expect("waiter panicked");
        }

        let mut times = completions.lock().unwrap().clone();
        times.sort();
        assert_eq!(times.len(), 12);

        // Any four consecutive grants must span at least the window
        // (allowing for the delay between grant and recording).
        for pair in times.windows(4) {
            let span = pair[3].duration_since(pair[0]);
            assert!(
                span >= Duration::from_millis(200),
                "four grants within {span:?} violate the window bound"
            );
        }
    }

    #[tokio::test]
    async fn test_canceled_waiter_leaves_no_grant() {
        let limiter = RateLimiter::new(1, Duration::from_millis(500)).unwrap();
        limiter.acquire().await;
        assert_eq!(limiter.grants_in_window(), 1);

        // Drop a waiting acquire mid-sleep.
        tokio::select! {
            () = limiter.acquire() => panic!("window is full; acquire cannot complete yet"),
            () = sleep(Duration::from_millis(50)) => {}
        }

        assert_eq!(
            limiter.grants_in_window(),
            1,
            "a canceled waiter must not record a grant"
        );

        // Once the original grant expires the window is empty again.
        sleep(Duration::from_millis(500)).await;
        assert_eq!(limiter.grants_in_window(), 0);

        let start = Instant::now();
        limiter.acquire().await;
        assert!(
            start.elapsed() < Duration::from_millis(100),
            "canceled waiter must not consume the freed slot"
        );
    }

    #[tokio::test]
    async fn test_grants_expire_after_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1)).unwrap();
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(limiter.grants_in_window(), 2);

        sleep(Duration::from_millis(1100)).await;
        assert_eq!(limiter.grants_in_window(), 0);
    }
}
