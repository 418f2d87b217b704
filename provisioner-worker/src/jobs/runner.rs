//! Bounded-retry execution of provisioning jobs
//!
//! The lifecycle manager never retries; this runner is the retry boundary.
//! Each attempt runs under the job's timeout budget, failures back off
//! exponentially, and after the attempt limit the job is reported as
//! permanently failed exactly once.

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use super::{JobContext, ProvisioningJob};

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Terminal outcome of running one job through its retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The job succeeded
    Completed {
        /// Attempts consumed, including the successful one
        attempts: u32,
    },
    /// Every attempt failed; the failure has been reported
    PermanentFailure {
        /// Attempts consumed
        attempts: u32,
    },
}

/// Executes jobs with retry, backoff and per-attempt timeout
pub struct JobRunner {
    context: JobContext,
    initial_backoff: Duration,
    attempt_timeout: Duration,
}

impl JobRunner {
    /// Creates a runner over the given collaborators
    #[must_use]
    pub const fn new(context: JobContext) -> Self {
        Self {
            context,
            initial_backoff: INITIAL_BACKOFF,
            attempt_timeout: ProvisioningJob::TIMEOUT,
        }
    }

    /// Overrides the initial backoff delay (tests use a near-zero value)
    #[must_use]
    pub const fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Overrides the per-attempt timeout (tests use a near-zero value)
    #[must_use]
    pub const fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Runs one job to a terminal outcome
    ///
    /// Retries on operation failure or attempt timeout, up to
    /// `ProvisioningJob::MAX_ATTEMPTS`. Permanent failure is logged exactly
    /// once, carrying the job tag.
    pub async fn run(&self, job: &ProvisioningJob) -> JobOutcome {
        let tag = job.tag();
        let mut backoff = self.initial_backoff;

        for attempt in 1..=ProvisioningJob::MAX_ATTEMPTS {
            match timeout(self.attempt_timeout, job.handle(&self.context)).await {
                Ok(Ok(())) => {
                    info!(tag = %tag, attempt, "Provisioning job completed");
                    return JobOutcome::Completed { attempts: attempt };
                }
                Ok(Err(e)) => {
                    warn!(tag = %tag, attempt, "Provisioning job attempt failed: {e}");
                }
                Err(_) => {
                    warn!(
                        tag = %tag,
                        attempt,
                        "Provisioning job attempt timed out after {:?}",
                        self.attempt_timeout
                    );
                }
            }

            if attempt < ProvisioningJob::MAX_ATTEMPTS {
                sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
            }
        }

        error!(
            tag = %tag,
            attempts = ProvisioningJob::MAX_ATTEMPTS,
            "Provisioning job permanently failed"
        );
        JobOutcome::PermanentFailure {
            attempts: ProvisioningJob::MAX_ATTEMPTS,
        }
    }
}
