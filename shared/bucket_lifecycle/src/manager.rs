//! Bucket lifecycle orchestration
//!
//! [`BucketLifecycleManager`] runs exactly one create or delete per call:
//! derive the canonical name, call the object store, update and persist the
//! tenant record, emit lifecycle events, and wrap any provider failure in a
//! [`BucketOperationError`]. The manager never retries and never swallows a
//! provider failure (delete obeys the raise-or-log flag); retry is the job
//! wrapper's responsibility.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::LifecycleSettings;
use crate::error::{BucketOperation, BucketOperationError, LifecycleResult};
use crate::events::{EventSink, LifecycleEvent, LifecycleEventKind};
use crate::formatter::format_bucket_name;
use crate::store::ObjectStore;
use crate::tenant::{Tenant, TenantStore};

/// Orchestrates bucket create/delete for one tenant
///
/// Holds a configuration snapshot and the tenant resolved at construction;
/// every operation re-derives its state from those. Stateless across calls
/// apart from the tenant record it owns and mutates.
pub struct BucketLifecycleManager {
    tenant: Tenant,
    settings: LifecycleSettings,
    store: Arc<dyn ObjectStore>,
    tenants: Arc<dyn TenantStore>,
    events: Arc<dyn EventSink>,
    created_bucket_name: Option<String>,
}

impl BucketLifecycleManager {
    /// Creates a manager for the given tenant with resolved collaborators
    #[must_use]
    pub fn new(
        tenant: Tenant,
        settings: LifecycleSettings,
        store: Arc<dyn ObjectStore>,
        tenants: Arc<dyn TenantStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            tenant,
            settings,
            store,
            tenants,
            events,
            created_bucket_name: None,
        }
    }

    /// Creates the tenant-specific bucket
    ///
    /// The candidate name is the configured suffix base concatenated with the
    /// tenant key, e.g. base `tenant` + key `42` -> `tenant42`.
    ///
    /// # Errors
    ///
    /// Returns `BucketOperationError` when the provider call or the tenant
    /// save fails.
    pub async fn create_tenant_bucket(&mut self) -> LifecycleResult<&str> {
        let candidate = format!("{}{}", self.settings.suffix_base, self.tenant.tenant_id);
        self.create_bucket(&candidate).await
    }

    /// Creates a bucket under the canonical form of `name`
    ///
    /// Event contract: `CreatingBucket` fires before the provider call and
    /// `CreatedBucket` fires exactly once after the outcome is decided, on
    /// the failure path as well. Listeners observe "attempt concluded", not
    /// success; only an `Ok` return guarantees the bucket exists and the
    /// tenant record was persisted.
    ///
    /// # Errors
    ///
    /// Returns `BucketOperationError::Provider` when the store rejects the
    /// call, `BucketOperationError::Persist` when the bucket was created but
    /// the tenant record save failed. On failure `tenant_bucket` keeps its
    /// prior value.
    pub async fn create_bucket(&mut self, name: &str) -> LifecycleResult<&str> {
        self.emit(LifecycleEventKind::CreatingBucket);

        let canonical = format_bucket_name(name);

        let result = match self.store.create_bucket(&canonical).await {
            Ok(()) => {
                let updated = Tenant {
                    tenant_id: self.tenant.tenant_id.clone(),
                    tenant_bucket: Some(canonical.clone()),
                };
                match self.tenants.save(&updated).await {
                    Ok(()) => {
                        self.tenant = updated;
                        self.created_bucket_name = Some(canonical.clone());
                        info!(
                            tenant_id = %self.tenant.tenant_id,
                            bucket = %canonical,
                            "Created tenant bucket"
                        );
                        Ok(())
                    }
                    Err(e) => Err(BucketOperationError::Persist {
                        tenant_id: self.tenant.tenant_id.clone(),
                        bucket: canonical.clone(),
                        source: e,
                    }),
                }
            }
            Err(provider) => Err(BucketOperationError::provider(
                &self.tenant.tenant_id,
                &canonical,
                BucketOperation::Create,
                provider,
            )),
        };

        // Fires on both paths, after the outcome is decided
        self.emit(LifecycleEventKind::CreatedBucket);

        match result {
            Ok(()) => Ok(self.created_bucket_name.as_deref().unwrap_or_default()),
            Err(e) => Err(e),
        }
    }

    /// Deletes the tenant's bucket, if one was ever assigned
    ///
    /// When `tenant_bucket` is unset this is a no-op: zero provider calls,
    /// zero events.
    ///
    /// # Errors
    ///
    /// Returns `BucketOperationError::Provider` when the store rejects the
    /// delete and the raise-on-delete-failure flag is set.
    pub async fn delete_tenant_bucket(&mut self) -> LifecycleResult<()> {
        let Some(name) = self.tenant.tenant_bucket.clone() else {
            return Ok(());
        };
        self.delete_bucket(&name).await
    }

    /// Deletes the named bucket
    ///
    /// Same event contract as [`Self::create_bucket`]: `DeletingBucket`
    /// before the call, `DeletedBucket` exactly once after the outcome,
    /// regardless of success. The stored `tenant_bucket` field is not cleared
    /// on success; clearing it is an external collaborator's decision.
    ///
    /// # Errors
    ///
    /// Returns `BucketOperationError::Provider` on provider failure when the
    /// raise-on-delete-failure flag is set; with the flag off the failure is
    /// logged and swallowed.
    pub async fn delete_bucket(&mut self, name: &str) -> LifecycleResult<()> {
        self.emit(LifecycleEventKind::DeletingBucket);

        let result = match self.store.delete_bucket(name).await {
            Ok(()) => {
                info!(
                    tenant_id = %self.tenant.tenant_id,
                    bucket = name,
                    "Deleted tenant bucket"
                );
                Ok(())
            }
            Err(provider) => {
                let err = BucketOperationError::provider(
                    &self.tenant.tenant_id,
                    name,
                    BucketOperation::Delete,
                    provider,
                );
                if self.settings.raise_on_delete_failure {
                    Err(err)
                } else {
                    error!(
                        tenant_id = %self.tenant.tenant_id,
                        bucket = name,
                        "Bucket delete failed (not raised): {err}"
                    );
                    Ok(())
                }
            }
        };

        // Fires on both paths, after the outcome is decided
        self.emit(LifecycleEventKind::DeletedBucket);

        result
    }

    /// Canonical name of the bucket created by this manager, if any
    #[must_use]
    pub fn bucket_name(&self) -> Option<&str> {
        self.created_bucket_name.as_deref()
    }

    /// The tenant record as this manager currently sees it
    #[must_use]
    pub const fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    /// Consumes the manager and returns the (possibly updated) tenant record
    #[must_use]
    pub fn into_tenant(self) -> Tenant {
        self.tenant
    }

    fn emit(&self, kind: LifecycleEventKind) {
        self.events.emit(LifecycleEvent::new(kind, &self.tenant));
    }
}
