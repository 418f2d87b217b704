//! SQS-backed job queue plumbing
//!
//! Generic send/poll/ack over a FIFO queue; the provisioning job enum is the
//! only message type the worker schedules, grouped per tenant so create and
//! delete for the same tenant never interleave.

mod error;
mod sqs_queue;

pub use error::{QueueError, QueueResult};
pub use sqs_queue::SqsQueue;

/// Wrapper for queue messages with metadata
#[derive(Debug, Clone)]
pub struct QueueMessage<T> {
    /// The message body
    pub body: T,
    /// Receipt handle for acknowledging the message
    pub receipt_handle: String,
    /// Message ID
    pub message_id: String,
}

/// Configuration for queue operations
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue URL
    pub queue_url: String,
    /// Default maximum number of messages to retrieve
    pub default_max_messages: i32,
    /// Default visibility timeout for messages (in seconds)
    pub default_visibility_timeout: i32,
    /// Default wait time for long polling
    pub default_wait_time_seconds: i32,
}

/// Trait for extracting message group ID for FIFO queues
pub trait MessageGroupId {
    /// Returns the message group ID for FIFO queue ordering
    fn message_group_id(&self) -> String;
}
