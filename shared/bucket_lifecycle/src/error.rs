//! Error types for bucket lifecycle operations

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::store::ProviderError;
use crate::tenant::TenantStoreError;

/// Result type alias for lifecycle operations
pub type LifecycleResult<T> = Result<T, BucketOperationError>;

/// Which bucket operation was being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum BucketOperation {
    /// Bucket creation
    Create,
    /// Bucket deletion
    Delete,
}

/// Typed error raised by the lifecycle manager
///
/// Constructed once at the failure site and never mutated afterwards. Always
/// carries the tenant identifier and the attempted bucket name so that
/// logging and telemetry stay consistent across callers.
#[derive(Error, Debug)]
pub enum BucketOperationError {
    /// The object store rejected or failed the call
    #[error("Bucket {operation} failed for tenant {tenant_id} (bucket: {bucket}): {source}")]
    Provider {
        /// Stable tenant key
        tenant_id: String,
        /// Canonical bucket name the operation attempted
        bucket: String,
        /// Create or delete
        operation: BucketOperation,
        /// The wrapped provider failure
        #[source]
        source: ProviderError,
    },

    /// The bucket was created but the tenant record could not be saved
    #[error("Bucket {bucket} created but tenant {tenant_id} record save failed: {source}")]
    Persist {
        /// Stable tenant key
        tenant_id: String,
        /// Canonical bucket name that was created
        bucket: String,
        /// The wrapped store failure
        #[source]
        source: TenantStoreError,
    },
}

impl BucketOperationError {
    pub(crate) fn provider(
        tenant_id: &str,
        bucket: &str,
        operation: BucketOperation,
        source: ProviderError,
    ) -> Self {
        Self::Provider {
            tenant_id: tenant_id.to_string(),
            bucket: bucket.to_string(),
            operation,
            source,
        }
    }

    /// Stable key of the tenant the failed operation ran for
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        match self {
            Self::Provider { tenant_id, .. } | Self::Persist { tenant_id, .. } => tenant_id,
        }
    }

    /// Canonical bucket name the failed operation attempted
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::Provider { bucket, .. } | Self::Persist { bucket, .. } => bucket,
        }
    }

    /// Provider error code, when the failure came from the object store
    #[must_use]
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Provider { source, .. } => source.code.as_deref(),
            Self::Persist { .. } => None,
        }
    }
}
