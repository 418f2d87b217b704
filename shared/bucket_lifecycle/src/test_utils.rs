//! In-memory fakes shared by unit and integration tests
//!
//! Enabled through the `test-utils` cargo feature so the worker crate's
//! tests can reuse them without duplicating the doubles.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::events::{EventSink, LifecycleEvent};
use crate::store::{ObjectStore, ProviderError, ProviderErrorKind, StoreResult};
use crate::tenant::{Tenant, TenantStore, TenantStoreError, TenantStoreResult};

/// In-memory tenant store keyed by tenant id
#[derive(Debug, Default)]
pub struct InMemoryTenantStore {
    records: Mutex<HashMap<String, Tenant>>,
    fail_saves: Mutex<bool>,
}

impl InMemoryTenantStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }

    /// Returns the saved record for the tenant, if any
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn saved(&self, tenant_id: &str) -> Option<Tenant> {
        self.records.lock().unwrap().get(tenant_id).cloned()
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn save(&self, tenant: &Tenant) -> TenantStoreResult<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(TenantStoreError::SaveFailed(
                "in-memory store configured to fail".to_string(),
            ));
        }
        self.records
            .lock()
            .unwrap()
            .insert(tenant.tenant_id.clone(), tenant.clone());
        Ok(())
    }
}

/// Event sink that records every emitted event in order
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingEventSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events observed so far, in emission order
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: LifecycleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Scripted object store: counts calls, fails or stalls on demand
#[derive(Debug, Default)]
pub struct ScriptedObjectStore {
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_with: Mutex<Option<ProviderError>>,
    stall: AtomicBool,
}

impl ScriptedObjectStore {
    /// Creates a store where every call succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with an access-denied style error
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_all(&self) {
        *self.fail_with.lock().unwrap() = Some(ProviderError {
            code: Some("AccessDenied".to_string()),
            kind: ProviderErrorKind::Client,
            message: "Access Denied".to_string(),
            raw_response: Some("<Error><Code>AccessDenied</Code></Error>".to_string()),
        });
    }

    /// Makes every subsequent call count itself and then never resolve
    ///
    /// Callers race the pending future against their own deadline.
    pub fn stall_all(&self) {
        self.stall.store(true, Ordering::SeqCst);
    }

    /// Number of create calls observed
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of delete calls observed
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn scripted_failure(&self) -> Option<ProviderError> {
        self.fail_with.lock().unwrap().clone()
    }

    async fn settle(&self) -> StoreResult<()> {
        if self.stall.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.scripted_failure().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ObjectStore for ScriptedObjectStore {
    async fn create_bucket(&self, _name: &str) -> StoreResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await
    }

    async fn delete_bucket(&self, _name: &str) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await
    }
}
