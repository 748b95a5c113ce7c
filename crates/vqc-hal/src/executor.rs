//! The circuit execution capability.
//!
//! # Contract
//!
//! ```text
//!   execute(circuit, shots, seed) ──→ Counts   (sum of counts == shots)
//! ```
//!
//! - **Async-native**: `execute` is the only call that blocks or suspends.
//! - **Thread-safe**: `Send + Sync` so one executor serves concurrent
//!   per-sample evaluations.
//! - **Seeded**: identical (circuit, shots, seed) on a deterministic
//!   executor yields identical counts.
//! - **Fail-fast**: an executor performs no retries of its own; retry and
//!   timeout are applied by [`execute_with_policy`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vqc_ir::CircuitInstance;

use crate::error::{HalError, HalResult};
use crate::result::Counts;

/// Something that can run a resolved circuit and return its histogram.
#[async_trait]
pub trait CircuitExecutor: Send + Sync {
    /// Get the name of this executor.
    fn name(&self) -> &str;

    /// Run `circuit` for `shots` repetitions using `seed` for sampling.
    ///
    /// Implementations MUST return a histogram whose total equals `shots`
    /// or an error.
    async fn execute(&self, circuit: &CircuitInstance, shots: u32, seed: u64) -> HalResult<Counts>;
}

#[async_trait]
impl<T: CircuitExecutor + ?Sized> CircuitExecutor for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn execute(&self, circuit: &CircuitInstance, shots: u32, seed: u64) -> HalResult<Counts> {
        (**self).execute(circuit, shots, seed).await
    }
}

/// Timeout and retry policy applied around a single executor call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPolicy {
    /// Maximum wall time per attempt; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Additional attempts after a failure. Zero means fail-fast.
    pub retries: u32,
    /// Delay before the first retry; doubled for each subsequent one.
    pub backoff: Duration,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            retries: 0,
            backoff: Duration::from_millis(100),
        }
    }
}

impl ExecutionPolicy {
    /// A policy with a single attempt and no timeout.
    pub fn fail_fast() -> Self {
        Self {
            timeout: None,
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry count and initial backoff.
    #[must_use]
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }
}

/// Run one executor call under `policy`.
///
/// Shot-count integrity is checked here as well, so a misbehaving executor
/// surfaces as [`HalError::ShotMismatch`] rather than a skewed estimate.
pub async fn execute_with_policy<E: CircuitExecutor + ?Sized>(
    executor: &E,
    circuit: &CircuitInstance,
    shots: u32,
    seed: u64,
    policy: &ExecutionPolicy,
) -> HalResult<Counts> {
    if shots == 0 {
        return Err(HalError::InvalidShots("shot count must be positive".into()));
    }

    let mut delay = policy.backoff;
    let mut attempt = 0;
    loop {
        let outcome = match policy.timeout {
            Some(limit) => tokio::time::timeout(limit, executor.execute(circuit, shots, seed))
                .await
                .unwrap_or(Err(HalError::Timeout(limit))),
            None => executor.execute(circuit, shots, seed).await,
        };
        let outcome = outcome.and_then(|counts| counts.verify_total(shots).map(|()| counts));

        match outcome {
            Ok(counts) => {
                if attempt > 0 {
                    debug!("{} succeeded after {} retries", executor.name(), attempt);
                }
                return Ok(counts);
            }
            Err(e) if attempt < policy.retries => {
                attempt += 1;
                warn!(
                    "{} failed ({}); retry {}/{} in {:?}",
                    executor.name(),
                    e,
                    attempt,
                    policy.retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(e) => return Err(e),
        }
    }
}
