use std::{future::Future, time::Duration};

use log::*;
use tokio::time::sleep;

use crate::traits::KioskError;

/// How often, and how patiently, an operation is retried when it collides with a concurrent writer.
///
/// The delay grows linearly: the n-th retry waits `n * backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 5, backoff: Duration::from_millis(25) }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self { max_retries, backoff }
    }

    /// A policy that gives up on the first conflict.
    pub fn no_retries() -> Self {
        Self { max_retries: 0, backoff: Duration::ZERO }
    }

    fn delay_for(&self, retry: u32) -> Duration {
        self.backoff.saturating_mul(retry)
    }
}

/// Runs `operation` until it succeeds, fails with something other than [`KioskError::PersistenceConflict`], or the
/// policy's retries are used up. The last error is returned in the latter two cases.
///
/// `operation` must be safe to re-run from scratch, which is the case for anything that runs in a single
/// transaction that was rolled back.
pub async fn retry_on_conflict<F, Fut, T>(policy: RetryPolicy, label: &str, mut operation: F) -> Result<T, KioskError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, KioskError>>,
{
    let mut retries = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if retries > 0 {
                    debug!("🔄️ {label} succeeded after {retries} retries");
                }
                return Ok(result);
            },
            Err(e) if e.is_conflict() && retries < policy.max_retries => {
                retries += 1;
                let delay = policy.delay_for(retries);
                warn!("🔄️ {label} collided with a concurrent update ({e}). Retry {retries}/{} in {delay:?}", policy.max_retries);
                sleep(delay).await;
            },
            Err(e) => {
                if e.is_conflict() {
                    error!("🔄️ {label} still conflicting after {retries} retries. Giving up.");
                }
                return Err(e);
            },
        }
    }
}
