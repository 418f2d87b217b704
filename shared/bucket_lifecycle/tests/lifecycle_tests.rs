//! Lifecycle manager behavior against in-memory collaborators

use std::sync::Arc;

use pretty_assertions::assert_eq;

use bucket_lifecycle::test_utils::{InMemoryTenantStore, RecordingEventSink, ScriptedObjectStore};
use bucket_lifecycle::{
    BucketLifecycleManager, BucketOperationError, LifecycleEventKind, LifecycleSettings, Tenant,
};

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

    fn manager(&self, tenant: Tenant, settings: LifecycleSettings) -> BucketLifecycleManager {
        BucketLifecycleManager::new(
            tenant,
            settings,
            self.store.clone(),
            self.tenants.clone(),
            self.events.clone(),
        )
    }

    fn event_kinds(&self) -> Vec<LifecycleEventKind> {
        self.events.events().iter().map(|e| e.kind).collect()
    }
}

#[tokio::test]
async fn create_derives_canonical_name_and_persists_tenant() {
    let harness = Harness::new();
    let mut manager = harness.manager(Tenant::new("42"), LifecycleSettings::default());

    let created = manager
        .create_tenant_bucket()
        .await
        .expect("create should succeed")
        .to_string();

    assert_eq!(created, "tenant42");
    assert_eq!(manager.bucket_name(), Some("tenant42"));
    assert_eq!(
        manager.tenant().tenant_bucket.as_deref(),
        Some("tenant42")
    );

    let saved = harness.tenants.saved("42").expect("tenant should be saved");
    assert_eq!(saved.tenant_bucket.as_deref(), Some("tenant42"));
}

#[tokio::test]
async fn create_normalizes_raw_candidate_names() {
    let harness = Harness::new();
    let mut manager = harness.manager(Tenant::new("x"), LifecycleSettings::default());

    let created = manager
        .create_bucket("Tenant-123_ABC")
        .await
        .expect("create should succeed")
        .to_string();

    assert_eq!(created, "tenant123abc");
}

#[tokio::test]
async fn create_failure_leaves_tenant_record_untouched() {
    let harness = Harness::new();
    harness.store.fail_all();
    let mut manager = harness.manager(Tenant::new("42"), LifecycleSettings::default());

    let err = manager
        .create_tenant_bucket()
        .await
        .expect_err("create should fail");

    assert_eq!(err.tenant_id(), "42");
    assert_eq!(err.bucket(), "tenant42");
    assert_eq!(err.provider_code(), Some("AccessDenied"));
    assert_eq!(manager.tenant().tenant_bucket, None);
    assert_eq!(harness.tenants.saved("42"), None);
}

#[tokio::test]
async fn create_emits_concluding_event_on_both_paths() {
    // Success path
    let harness = Harness::new();
    let mut manager = harness.manager(Tenant::new("1"), LifecycleSettings::default());
    manager.create_tenant_bucket().await.expect("should succeed");
    assert_eq!(
        harness.event_kinds(),
        vec![
            LifecycleEventKind::CreatingBucket,
            LifecycleEventKind::CreatedBucket
        ]
    );

    // Failure path: CreatedBucket still fires, exactly once
    let harness = Harness::new();
    harness.store.fail_all();
    let mut manager = harness.manager(Tenant::new("1"), LifecycleSettings::default());
    manager
        .create_tenant_bucket()
        .await
        .expect_err("should fail");
    assert_eq!(
        harness.event_kinds(),
        vec![
            LifecycleEventKind::CreatingBucket,
            LifecycleEventKind::CreatedBucket
        ]
    );
}

#[tokio::test]
async fn persist_failure_after_create_surfaces_as_persist_error() {
    let harness = Harness::new();
    harness.tenants.fail_saves();
    let mut manager = harness.manager(Tenant::new("42"), LifecycleSettings::default());

    let err = manager
        .create_tenant_bucket()
        .await
        .expect_err("save failure should surface");

    assert!(matches!(err, BucketOperationError::Persist { .. }));
    assert_eq!(err.bucket(), "tenant42");
    // The manager does not advertise a bucket it could not record
    assert_eq!(manager.tenant().tenant_bucket, None);
}

#[tokio::test]
async fn delete_without_assigned_bucket_is_a_no_op() {
    let harness = Harness::new();
    let mut manager = harness.manager(Tenant::new("42"), LifecycleSettings::default());

    manager
        .delete_tenant_bucket()
        .await
        .expect("no-op delete should succeed");

    assert_eq!(harness.store.delete_calls(), 0);
    assert!(harness.events.events().is_empty());
}

#[tokio::test]
async fn delete_targets_stored_bucket_and_keeps_the_field() {
    let harness = Harness::new();
    let tenant = Tenant {
        tenant_id: "42".to_string(),
        tenant_bucket: Some("tenant42".to_string()),
    };
    let mut manager = harness.manager(tenant, LifecycleSettings::default());

    manager.delete_tenant_bucket().await.expect("should succeed");

    assert_eq!(harness.store.delete_calls(), 1);
    assert_eq!(
        harness.event_kinds(),
        vec![
            LifecycleEventKind::DeletingBucket,
            LifecycleEventKind::DeletedBucket
        ]
    );
    // Stored name is intentionally not cleared on success
    assert_eq!(
        manager.tenant().tenant_bucket.as_deref(),
        Some("tenant42")
    );
}

#[tokio::test]
async fn delete_failure_raises_when_flag_is_set() {
    let harness = Harness::new();
    harness.store.fail_all();
    let tenant = Tenant {
        tenant_id: "42".to_string(),
        tenant_bucket: Some("tenant42".to_string()),
    };
    let mut manager = harness.manager(tenant, LifecycleSettings::default());

    let err = manager
        .delete_tenant_bucket()
        .await
        .expect_err("delete should fail");

    assert_eq!(err.tenant_id(), "42");
    assert_eq!(err.bucket(), "tenant42");
    // Concluding event still fires on the failure path
    assert_eq!(
        harness.event_kinds(),
        vec![
            LifecycleEventKind::DeletingBucket,
            LifecycleEventKind::DeletedBucket
        ]
    );
}

#[tokio::test]
async fn delete_failure_is_logged_not_raised_when_flag_is_off() {
    let harness = Harness::new();
    harness.store.fail_all();
    let tenant = Tenant {
        tenant_id: "42".to_string(),
        tenant_bucket: Some("tenant42".to_string()),
    };
    let settings = LifecycleSettings {
        raise_on_delete_failure: false,
        ..LifecycleSettings::default()
    };
    let mut manager = harness.manager(tenant, settings);

    manager
        .delete_tenant_bucket()
        .await
        .expect("failure should be swallowed with the flag off");

    assert_eq!(harness.store.delete_calls(), 1);
}

#[tokio::test]
async fn custom_suffix_base_feeds_name_derivation() {
    let harness = Harness::new();
    let settings = LifecycleSettings {
        suffix_base: "Acme-Corp-".to_string(),
        ..LifecycleSettings::default()
    };
    let mut manager = harness.manager(Tenant::new("42"), settings);

    let created = manager
        .create_tenant_bucket()
        .await
        .expect("create should succeed")
        .to_string();

    // Candidate is formatted after concatenation
    assert_eq!(created, "acmecorp42");
}
