//! Configuration for credentials, endpoint and lifecycle behavior
//!
//! All values are resolved once from process configuration; the manager and
//! the object store client take snapshots at construction time and never
//! re-read per call.

use std::env;

/// Default S3 API version, recorded for diagnostics (the SDK pins the wire
/// version itself)
pub const DEFAULT_API_VERSION: &str = "2006-03-01";

/// Static access key + secret for the object store
///
/// Process-configured, not owned per-tenant.
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    /// Access key ID
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
}

impl StoreCredentials {
    /// Reads credentials from `TENANT_BUCKETS_ACCESS_KEY` / `TENANT_BUCKETS_SECRET_KEY`
    ///
    /// # Panics
    ///
    /// Panics if either variable is not set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            access_key: env::var("TENANT_BUCKETS_ACCESS_KEY")
                .expect("TENANT_BUCKETS_ACCESS_KEY environment variable is not set"),
            secret_key: env::var("TENANT_BUCKETS_SECRET_KEY")
                .expect("TENANT_BUCKETS_SECRET_KEY environment variable is not set"),
        }
    }
}

/// Endpoint configuration for the object store
#[derive(Debug, Clone)]
pub struct StoreEndpointConfig {
    /// Endpoint URL override; `None` uses the provider default
    pub endpoint_url: Option<String>,
    /// Region name, e.g. `us-east-1`
    pub region: String,
    /// API version string, diagnostic only
    pub api_version: String,
    /// Path-style addressing, required for MinIO / LocalStack deployments
    pub path_style: bool,
}

impl StoreEndpointConfig {
    /// Builds an endpoint config for the given region with provider defaults
    #[must_use]
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            endpoint_url: None,
            region: region.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            path_style: false,
        }
    }

    /// Reads endpoint configuration from the environment
    ///
    /// `TENANT_BUCKETS_REGION` defaults to `us-east-1`;
    /// `TENANT_BUCKETS_ENDPOINT` is optional; `TENANT_BUCKETS_PATH_STYLE`
    /// enables path-style addressing when set to `true`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            endpoint_url: env::var("TENANT_BUCKETS_ENDPOINT").ok(),
            region: env::var("TENANT_BUCKETS_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),
            api_version: DEFAULT_API_VERSION.to_string(),
            path_style: env::var("TENANT_BUCKETS_PATH_STYLE")
                .is_ok_and(|v| v.trim().eq_ignore_ascii_case("true")),
        }
    }
}

/// Behavioral settings for the lifecycle manager
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// Base string prepended to the tenant key when deriving the bucket name
    pub suffix_base: String,
    /// Whether delete failures are raised to the caller or only logged
    pub raise_on_delete_failure: bool,
}

impl LifecycleSettings {
    /// Reads settings from the environment
    ///
    /// `TENANT_BUCKETS_SUFFIX_BASE` defaults to `tenant`;
    /// `TENANT_BUCKETS_RAISE_ON_DELETE_FAILURE` defaults to `true`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            suffix_base: env::var("TENANT_BUCKETS_SUFFIX_BASE")
                .unwrap_or_else(|_| "tenant".to_string()),
            raise_on_delete_failure: env::var("TENANT_BUCKETS_RAISE_ON_DELETE_FAILURE")
                .map_or(true, |v| v.trim().eq_ignore_ascii_case("true")),
        }
    }
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            suffix_base: "tenant".to_string(),
            raise_on_delete_failure: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    #[serial]
    fn endpoint_config_defaults() {
        env::remove_var("TENANT_BUCKETS_ENDPOINT");
        env::remove_var("TENANT_BUCKETS_REGION");
        env::remove_var("TENANT_BUCKETS_PATH_STYLE");

        let config = StoreEndpointConfig::from_env();
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert!(!config.path_style);
    }

    #[test]
    #[serial]
    fn endpoint_config_reads_overrides() {
        env::set_var("TENANT_BUCKETS_ENDPOINT", "http://localhost:4566");
        env::set_var("TENANT_BUCKETS_REGION", "eu-central-1");
        env::set_var("TENANT_BUCKETS_PATH_STYLE", "TRUE");

        let config = StoreEndpointConfig::from_env();
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(config.region, "eu-central-1");
        assert!(config.path_style);

        env::remove_var("TENANT_BUCKETS_ENDPOINT");
        env::remove_var("TENANT_BUCKETS_REGION");
        env::remove_var("TENANT_BUCKETS_PATH_STYLE");
    }

    #[test]
    #[serial]
    fn lifecycle_settings_defaults() {
        env::remove_var("TENANT_BUCKETS_SUFFIX_BASE");
        env::remove_var("TENANT_BUCKETS_RAISE_ON_DELETE_FAILURE");

        let settings = LifecycleSettings::from_env();
        assert_eq!(settings.suffix_base, "tenant");
        assert!(settings.raise_on_delete_failure);
    }

    #[test]
    #[serial]
    fn lifecycle_settings_delete_flag_off() {
        env::set_var("TENANT_BUCKETS_RAISE_ON_DELETE_FAILURE", "false");

        let settings = LifecycleSettings::from_env();
        assert!(!settings.raise_on_delete_failure);

        env::remove_var("TENANT_BUCKETS_RAISE_ON_DELETE_FAILURE");
    }
}
