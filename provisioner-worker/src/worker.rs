//! Worker loop: poll the provisioning queue, run jobs, settle messages

use std::sync::Arc;

use aws_sdk_sqs::Client as SqsClient;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use bucket_lifecycle::{S3ObjectStore, TracingEventSink};

use crate::jobs::{JobContext, JobOutcome, JobRunner, ProvisioningJob};
use crate::queue::SqsQueue;
use crate::types::environment::Environment;

/// Result type for worker operations
pub type WorkerResult<T> = anyhow::Result<T>;

/// Queue-driven provisioning worker
pub struct ProvisionerWorker {
    queue: SqsQueue<ProvisioningJob>,
    runner: JobRunner,
    shutdown_token: CancellationToken,
}

impl ProvisionerWorker {
    /// Creates a worker with clients resolved from the environment
    ///
    /// The tenant store is an external collaborator; the caller supplies the
    /// implementation wired to the application's tenant persistence.
    pub async fn new(
        env: Environment,
        tenants: Arc<dyn bucket_lifecycle::TenantStore>,
    ) -> WorkerResult<Self> {
        let sqs_client = Arc::new(SqsClient::from_conf(env.sqs_client_config().await));
        let queue = SqsQueue::new(sqs_client, env.queue_config());

        let store = Arc::new(
            S3ObjectStore::connect(&env.store_credentials(), &env.store_endpoint_config()).await,
        );

        let context = JobContext {
            settings: env.lifecycle_settings(),
            store,
            tenants,
            events: Arc::new(TracingEventSink),
        };

        Ok(Self {
            queue,
            runner: JobRunner::new(context),
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Returns a clone of the shutdown token for external control
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the poll loop until shutdown is requested
    ///
    /// Jobs that reach a terminal outcome (success or permanent failure) are
    /// settled so the queue does not redeliver them; transient poll errors
    /// are logged and the loop continues.
    ///
    /// # Errors
    ///
    /// Currently only returns `Ok`; the signature leaves room for fatal
    /// startup errors surfaced mid-loop.
    pub async fn start(&self) -> WorkerResult<()> {
        info!("Provisioner worker started");

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Provisioner worker received shutdown signal");
                    break;
                }
                polled = self.queue.receive() => {
                    match polled {
                        Ok(messages) => {
                            for message in messages {
                                self.process(&message.body, &message.receipt_handle).await;
                            }
                        }
                        Err(e) => {
                            warn!("Failed to poll provisioning queue: {e}");
                        }
                    }
                }
            }
        }

        info!("Provisioner worker stopped");
        Ok(())
    }

    async fn process(&self, job: &ProvisioningJob, receipt_handle: &str) {
        let outcome = self.runner.run(job).await;

        match outcome {
            JobOutcome::Completed { attempts } => {
                info!(tag = %job.tag(), attempts, "Job settled after completion");
            }
            JobOutcome::PermanentFailure { attempts } => {
                warn!(tag = %job.tag(), attempts, "Job settled after permanent failure");
            }
        }

        if let Err(e) = self.queue.settle(receipt_handle).await {
            error!(tag = %job.tag(), "Failed to settle job message: {e}");
        }
    }
}
