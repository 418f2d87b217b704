//! Tenant bucket lifecycle management
//!
//! This crate provisions and tears down one S3-compatible bucket per tenant:
//! canonical bucket-name derivation, create/delete against the object store,
//! typed error capture, lifecycle event emission, and a scoped active-bucket
//! context for request-time storage access.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Configuration for credentials, endpoint and lifecycle behavior
pub mod config;
/// Scoped active-bucket context with restore-on-exit
pub mod context;
/// Error types for bucket lifecycle operations
pub mod error;
/// Lifecycle event emission
pub mod events;
/// Canonical bucket-name derivation
pub mod formatter;
/// Bucket lifecycle orchestration
pub mod manager;
/// Object store client boundary
pub mod store;
/// Tenant model and persistence seam
pub mod tenant;

#[cfg(feature = "test-utils")]
/// In-memory fakes shared by unit and integration tests
pub mod test_utils;

pub use config::{LifecycleSettings, StoreCredentials, StoreEndpointConfig};
pub use context::{ActiveBucket, ActiveBucketGuard};
pub use error::{BucketOperation, BucketOperationError, LifecycleResult};
pub use events::{EventSink, LifecycleEvent, LifecycleEventKind, TracingEventSink};
pub use formatter::format_bucket_name;
pub use manager::BucketLifecycleManager;
pub use store::{ObjectStore, ProviderError, ProviderErrorKind, S3ObjectStore};
pub use tenant::{Tenant, TenantStore, TenantStoreError};
