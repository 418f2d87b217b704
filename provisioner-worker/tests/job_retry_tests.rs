//! Job runner retry-budget behavior against in-memory collaborators

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use bucket_lifecycle::test_utils::{InMemoryTenantStore, RecordingEventSink, ScriptedObjectStore};
use bucket_lifecycle::{LifecycleEventKind, LifecycleSettings, Tenant};
use provisioner_worker::jobs::{JobContext, JobOutcome, JobRunner, ProvisioningJob};

struct Harness {
    store: Arc<ScriptedObjectStore>,
    tenants: Arc<InMemoryTenantStore>,
    events: Arc<RecordingEventSink>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(ScriptedObjectStore::new()),
            tenants: Arc::new(InMemoryTenantStore::new()),
            events: Arc::new(RecordingEventSink::new()),
        }
    }

    fn runner(&self) -> JobRunner {
        JobRunner::new(JobContext {
            settings: LifecycleSettings::default(),
            store: self.store.clone(),
            tenants: self.tenants.clone(),
            events: self.events.clone(),
        })
        .with_initial_backoff(Duration::from_millis(1))
    }
}

#[tokio::test]
async fn successful_create_job_completes_on_first_attempt() {
    let harness = Harness::new();
    let job = ProvisioningJob::CreateTenantBucket {
        tenant: Tenant::new("42"),
    };

    let outcome = harness.runner().run(&job).await;

    assert_eq!(outcome, JobOutcome::Completed { attempts: 1 });
    assert_eq!(harness.store.create_calls(), 1);

    let saved = harness.tenants.saved("42").expect("tenant persisted");
    assert_eq!(saved.tenant_bucket.as_deref(), Some("tenant42"));
}

#[tokio::test]
async fn failing_job_exhausts_exactly_the_attempt_budget() {
    let harness = Harness::new();
    harness.store.fail_all();
    let job = ProvisioningJob::CreateTenantBucket {
        tenant: Tenant::new("42"),
    };

    let outcome = harness.runner().run(&job).await;

    assert_eq!(
        outcome,
        JobOutcome::PermanentFailure {
            attempts: ProvisioningJob::MAX_ATTEMPTS
        }
    );
    // Exactly 5 provider-call attempts, no more after permanent failure
    assert_eq!(harness.store.create_calls(), 5);
    assert_eq!(harness.tenants.saved("42"), None);
}

#[tokio::test]
async fn each_attempt_emits_its_own_event_pair() {
    let harness = Harness::new();
    harness.store.fail_all();
    let job = ProvisioningJob::CreateTenantBucket {
        tenant: Tenant::new("7"),
    };

    harness.runner().run(&job).await;

    let kinds: Vec<LifecycleEventKind> =
        harness.events.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), 10);
    for pair in kinds.chunks(2) {
        assert_eq!(
            pair,
            [
                LifecycleEventKind::CreatingBucket,
                LifecycleEventKind::CreatedBucket
            ]
        );
    }
}

#[tokio::test]
async fn hanging_attempts_time_out_and_exhaust_the_budget() {
    let harness = Harness::new();
    harness.store.stall_all();
    let job = ProvisioningJob::CreateTenantBucket {
        tenant: Tenant::new("42"),
    };

    let runner = harness
        .runner()
        .with_attempt_timeout(Duration::from_millis(10));
    let outcome = runner.run(&job).await;

    assert_eq!(
        outcome,
        JobOutcome::PermanentFailure {
            attempts: ProvisioningJob::MAX_ATTEMPTS
        }
    );
    // Every attempt reached the provider before its deadline cut it off
    assert_eq!(harness.store.create_calls(), 5);
    assert_eq!(harness.tenants.saved("42"), None);
}

#[tokio::test]
async fn delete_job_for_bucketless_tenant_completes_without_provider_calls() {
    let harness = Harness::new();
    let job = ProvisioningJob::DeleteTenantBucket {
        tenant: Tenant::new("42"),
    };

    let outcome = harness.runner().run(&job).await;

    assert_eq!(outcome, JobOutcome::Completed { attempts: 1 });
    assert_eq!(harness.store.delete_calls(), 0);
    assert!(harness.events.events().is_empty());
}

#[tokio::test]
async fn delete_job_targets_the_stored_bucket() {
    let harness = Harness::new();
    let job = ProvisioningJob::DeleteTenantBucket {
        tenant: Tenant {
            tenant_id: "42".to_string(),
            tenant_bucket: Some("tenant42".to_string()),
        },
    };

    let outcome = harness.runner().run(&job).await;

    assert_eq!(outcome, JobOutcome::Completed { attempts: 1 });
    assert_eq!(harness.store.delete_calls(), 1);
}
