//! Bounded retry for resources that another part of the page fills in later.

use std::{future::Future, time::Duration};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Probes up to `max_attempts` times, sleeping `delay` between attempts.
    /// Gives up with `None`; callers treat that as "nothing to render".
    pub async fn run<T, P, S, F>(&self, mut attempt: P, mut sleep: S) -> Option<T>
    where
        P: FnMut() -> Option<T>,
        S: FnMut(Duration) -> F,
        F: Future<Output = ()>,
    {
        for n in 0..self.max_attempts {
            if n > 0 {
                sleep(self.delay).await;
            }
            if let Some(found) = attempt() {
                return Some(found);
            }
        }
        None
    }
}
