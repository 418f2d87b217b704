//! Scoped active-bucket context with restore-on-exit
//!
//! Request-time storage access reads one "active bucket" value. Entering a
//! tenant's context swaps that value for the tenant's bucket and returns a
//! guard; dropping the guard restores the previous value. This replaces a
//! process-wide mutable configuration swap with a scoped resource so a
//! panicking or early-returning caller cannot leak another tenant's bucket
//! into the next request. Save/restore depth is one: nested tenant contexts
//! are not supported.

use std::sync::Mutex;

use tracing::debug;

use crate::tenant::Tenant;

/// The currently active bucket target for storage access
#[derive(Debug)]
pub struct ActiveBucket {
    current: Mutex<String>,
}

impl ActiveBucket {
    /// Creates the context with the process default bucket
    #[must_use]
    pub fn new(default_bucket: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(default_bucket.into()),
        }
    }

    /// Returns the bucket name storage access should currently target
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn get(&self) -> String {
        self.current.lock().expect("active bucket lock poisoned").clone()
    }

    /// Enters the tenant's context, swapping in their bucket
    ///
    /// Uses the tenant's stored bucket name, falling back to the
    /// deterministic default `"tenant" + key` when none was assigned. The
    /// returned guard restores the prior value when dropped.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn enter(&self, tenant: &Tenant) -> ActiveBucketGuard<'_> {
        let bucket = tenant
            .tenant_bucket
            .clone()
            .unwrap_or_else(|| format!("tenant{}", tenant.tenant_id));

        let mut current = self.current.lock().expect("active bucket lock poisoned");
        let previous = std::mem::replace(&mut *current, bucket);
        drop(current);

        debug!(tenant_id = %tenant.tenant_id, "Entered tenant storage context");

        ActiveBucketGuard {
            context: self,
            previous,
        }
    }

    fn restore(&self, previous: String) {
        if let Ok(mut current) = self.current.lock() {
            *current = previous;
        }
    }
}

/// Guard that restores the previous active bucket on drop
#[must_use = "dropping the guard immediately reverts the tenant context"]
#[derive(Debug)]
pub struct ActiveBucketGuard<'a> {
    context: &'a ActiveBucket,
    previous: String,
}

impl Drop for ActiveBucketGuard<'_> {
    fn drop(&mut self) {
        self.context.restore(std::mem::take(&mut self.previous));
    }
}
