//! Pacing of store calls.
//!
//! The ledger waits on its [`Pacer`] before every store request. This is a
//! plain delay, not a retry: nothing is re-sent and there is no backoff.

use std::{future::Future, time::Duration};

/// Delay used by the default pacer.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

pub trait Pacer {
    fn pace(&self) -> impl Future<Output = ()> + Send;
}

/// Sleep for a fixed amount of time before each store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_DELAY)
    }
}

impl Pacer for FixedDelay {
    async fn pace(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Never waits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Pacer for NoDelay {
    async fn pace(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_for_its_duration() {
        let start = tokio::time::Instant::now();
        FixedDelay(Duration::from_millis(250)).pace().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn default_is_half_a_second() {
        assert_eq!(FixedDelay::default().0, DEFAULT_DELAY);
        NoDelay.pace().await;
    }
}
