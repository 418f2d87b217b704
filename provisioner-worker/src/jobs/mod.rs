//! Queued units of work for tenant bucket provisioning
//!
//! Each job carries the tenant record in the message body, constructs a fresh
//! `BucketLifecycleManager` when handled, and exposes a `tenant:<id>` tag for
//! observability. Retry and timeout budgets live on the job; enforcement is
//! the runner's responsibility.

mod runner;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bucket_lifecycle::{
    BucketLifecycleManager, EventSink, LifecycleResult, LifecycleSettings, ObjectStore, Tenant,
    TenantStore,
};

use crate::queue::MessageGroupId;

pub use runner::{JobOutcome, JobRunner};

/// Collaborators a job needs to run, resolved once at worker startup
pub struct JobContext {
    /// Lifecycle behavior settings snapshot
    pub settings: LifecycleSettings,
    /// Object store client
    pub store: Arc<dyn ObjectStore>,
    /// Tenant persistence seam
    pub tenants: Arc<dyn TenantStore>,
    /// Lifecycle event sink
    pub events: Arc<dyn EventSink>,
}

/// A queued bucket provisioning job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProvisioningJob {
    /// Create the tenant's bucket
    CreateTenantBucket {
        /// The tenant to provision for
        tenant: Tenant,
    },
    /// Delete the tenant's bucket
    DeleteTenantBucket {
        /// The tenant to deprovision for
        tenant: Tenant,
    },
}

impl ProvisioningJob {
    /// Maximum number of attempts before the job is reported as permanently
    /// failed
    pub const MAX_ATTEMPTS: u32 = 5;

    /// Budget for a single attempt, including the provider call
    pub const TIMEOUT: Duration = Duration::from_secs(120);

    /// The tenant this job runs for
    #[must_use]
    pub const fn tenant(&self) -> &Tenant {
        match self {
            Self::CreateTenantBucket { tenant } | Self::DeleteTenantBucket { tenant } => tenant,
        }
    }

    /// Observability tag grouping queue activity per tenant
    #[must_use]
    pub fn tag(&self) -> String {
        format!("tenant:{}", self.tenant().tenant_id)
    }

    /// Runs the job once against a freshly constructed lifecycle manager
    ///
    /// # Errors
    ///
    /// Returns `BucketOperationError` when the underlying operation fails;
    /// deciding whether to retry is the caller's job.
    pub async fn handle(&self, context: &JobContext) -> LifecycleResult<()> {
        let mut manager = BucketLifecycleManager::new(
            self.tenant().clone(),
            context.settings.clone(),
            Arc::clone(&context.store),
            Arc::clone(&context.tenants),
            Arc::clone(&context.events),
        );

        match self {
            Self::CreateTenantBucket { .. } => {
                manager.create_tenant_bucket().await?;
                Ok(())
            }
            Self::DeleteTenantBucket { .. } => manager.delete_tenant_bucket().await,
        }
    }
}

impl MessageGroupId for ProvisioningJob {
    fn message_group_id(&self) -> String {
        self.tenant().tenant_id.clone()
    }
}
