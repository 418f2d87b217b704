//! Lifecycle event emission
//!
//! Events fire before and after each bucket operation regardless of outcome.
//! `CreatedBucket`/`DeletedBucket` mean "attempt concluded", not "operation
//! succeeded": the manager emits them exactly once per call on both the
//! success and the failure path. Listeners that need a success signal must
//! observe the operation result instead.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::tenant::Tenant;

/// Kind of lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleEventKind {
    /// A bucket create attempt is starting
    CreatingBucket,
    /// A bucket create attempt concluded (success or failure)
    CreatedBucket,
    /// A bucket delete attempt is starting
    DeletingBucket,
    /// A bucket delete attempt concluded (success or failure)
    DeletedBucket,
}

/// A lifecycle event carrying a snapshot of the tenant it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// What happened
    pub kind: LifecycleEventKind,
    /// The tenant the operation ran for, as of emission time
    pub tenant: Tenant,
}

impl LifecycleEvent {
    /// Creates an event for the given kind and tenant snapshot
    #[must_use]
    pub fn new(kind: LifecycleEventKind, tenant: &Tenant) -> Self {
        Self {
            kind,
            tenant: tenant.clone(),
        }
    }
}

/// Sink for lifecycle events
///
/// Implementations must be cheap and non-blocking; the manager emits inline
/// on the operation path.
pub trait EventSink: Send + Sync {
    /// Delivers one event to the listener
    fn emit(&self, event: LifecycleEvent);
}

/// Default sink that logs each event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: LifecycleEvent) {
        tracing::info!(
            tenant_id = %event.tenant.tenant_id,
            bucket = event.tenant.tenant_bucket.as_deref().unwrap_or(""),
            "bucket lifecycle event: {}",
            event.kind
        );
    }
}
