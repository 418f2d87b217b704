//! Generic SQS-backed job queue

use std::sync::Arc;

use aws_sdk_sqs::types::Message;
use aws_sdk_sqs::Client as SqsClient;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use super::error::QueueResult;
use super::{MessageGroupId, QueueConfig, QueueMessage};

/// FIFO job queue over SQS for any serializable job type
///
/// Relies on content-based deduplication on the queue itself; the group id
/// comes from the job so per-tenant ordering holds.
pub struct SqsQueue<T> {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SqsQueue<T>
where
    T: Serialize + DeserializeOwned + MessageGroupId + Send + Sync,
{
    /// Creates a queue handle from a pre-configured SQS client
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self {
            sqs_client,
            config,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Schedules a job on the queue, returning the provider message id
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if serialization or the send call fails
    pub async fn enqueue(&self, job: &T) -> QueueResult<String> {
        let body = serde_json::to_string(job)?;

        let sent = self
            .sqs_client
            .send_message()
            .queue_url(&self.config.queue_url)
            .message_body(body)
            .message_group_id(job.message_group_id())
            .send()
            .await?;

        Ok(sent.message_id().unwrap_or_default().to_string())
    }

    /// Long-polls the queue for pending jobs
    ///
    /// Messages whose body fails to deserialize are logged and skipped; they
    /// become visible again once the visibility timeout lapses.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the receive call fails
    pub async fn receive(&self) -> QueueResult<Vec<QueueMessage<T>>> {
        let received = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.default_max_messages)
            .visibility_timeout(self.config.default_visibility_timeout)
            .wait_time_seconds(self.config.default_wait_time_seconds)
            .send()
            .await?;

        Ok(received
            .messages()
            .iter()
            .filter_map(Self::parse_message)
            .collect())
    }

    /// Settles a job by deleting its message from the queue
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the delete call fails
    pub async fn settle(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }

    fn parse_message(msg: &Message) -> Option<QueueMessage<T>> {
        let body = msg.body()?;
        let receipt_handle = msg.receipt_handle()?.to_string();
        let message_id = msg.message_id()?.to_string();

        match serde_json::from_str::<T>(body) {
            Ok(parsed) => Some(QueueMessage {
                body: parsed,
                receipt_handle,
                message_id,
            }),
            Err(e) => {
                error!(message_id = %message_id, "Failed to deserialize job message: {e}");
                None
            }
        }
    }
}
