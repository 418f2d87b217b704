//! Tenant model and the persistence seam
//!
//! The tenant record itself is owned by an external store; this crate only
//! reads the stable key, mutates the `tenant_bucket` field after a successful
//! create, and saves the record through the [`TenantStore`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tenant record as carried through bucket lifecycle operations
///
/// Serializable so queued jobs can carry the record in the message body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tenant {
    /// Stable tenant key
    pub tenant_id: String,
    /// Canonical bucket name once assigned
    ///
    /// Once set this references the bucket created for the tenant. It is not
    /// cleared on delete; a successful delete leaves it pointing at a bucket
    /// that no longer exists unless an external collaborator clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_bucket: Option<String>,
}

impl Tenant {
    /// Creates a tenant record with no bucket assigned
    #[must_use]
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_bucket: None,
        }
    }
}

/// Result type alias for tenant store operations
pub type TenantStoreResult<T> = Result<T, TenantStoreError>;

/// Errors surfaced by the external tenant store
#[derive(Error, Debug)]
pub enum TenantStoreError {
    /// The backing store rejected or failed the save
    #[error("Failed to persist tenant record: {0}")]
    SaveFailed(String),
}

/// Persistence seam for tenant records
///
/// The lifecycle manager only needs the save capability; reads go through the
/// tenant carried into each operation.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Persists the tenant record, including its `tenant_bucket` field
    ///
    /// # Errors
    ///
    /// Returns `TenantStoreError::SaveFailed` if the backing store fails.
    async fn save(&self, tenant: &Tenant) -> TenantStoreResult<()>;
}
