//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use bucket_lifecycle::{LifecycleSettings, StoreCredentials, StoreEndpointConfig};

use crate::queue::QueueConfig;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value.
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// Queue URL for provisioning jobs
    ///
    /// # Panics
    ///
    /// Panics if `PROVISIONER_QUEUE_URL` is not set outside development.
    #[must_use]
    pub fn queue_url(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("PROVISIONER_QUEUE_URL")
                .expect("PROVISIONER_QUEUE_URL environment variable is not set"),
            Self::Development => env::var("PROVISIONER_QUEUE_URL").unwrap_or_else(|_| {
                "http://localhost:4566/000000000000/tenant-provisioning.fifo".to_string()
            }),
        }
    }

    /// Queue polling configuration
    ///
    /// The visibility timeout must exceed the full retry budget of a job
    /// (5 attempts x 120 s each plus backoff sleeps), otherwise SQS would
    /// redeliver a message while the runner is still working it and two
    /// executions could race on the same tenant.
    #[must_use]
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            queue_url: self.queue_url(),
            default_max_messages: 1,
            default_visibility_timeout: 660,
            default_wait_time_seconds: 20,
        }
    }

    /// Object store credentials
    ///
    /// Development falls back to the `LocalStack` test credentials.
    #[must_use]
    pub fn store_credentials(&self) -> StoreCredentials {
        match self {
            Self::Production | Self::Staging => StoreCredentials::from_env(),
            Self::Development => StoreCredentials {
                access_key: env::var("TENANT_BUCKETS_ACCESS_KEY")
                    .unwrap_or_else(|_| "test".to_string()),
                secret_key: env::var("TENANT_BUCKETS_SECRET_KEY")
                    .unwrap_or_else(|_| "test".to_string()),
            },
        }
    }

    /// Object store endpoint configuration
    ///
    /// Development targets `LocalStack` with path-style addressing forced.
    #[must_use]
    pub fn store_endpoint_config(&self) -> StoreEndpointConfig {
        let mut config = StoreEndpointConfig::from_env();
        if *self == Self::Development {
            if config.endpoint_url.is_none() {
                config.endpoint_url = self.override_aws_endpoint_url().map(ToString::to_string);
            }
            config.path_style = true;
        }
        config
    }

    /// Lifecycle behavior settings
    #[must_use]
    pub fn lifecycle_settings(&self) -> LifecycleSettings {
        LifecycleSettings::from_env()
    }

    /// DynamoDB table holding tenant records
    ///
    /// # Panics
    ///
    /// Panics if `TENANT_TABLE_NAME` is not set outside development.
    #[must_use]
    pub fn tenant_table_name(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("TENANT_TABLE_NAME")
                .expect("TENANT_TABLE_NAME environment variable is not set"),
            Self::Development => {
                env::var("TENANT_TABLE_NAME").unwrap_or_else(|_| "tenants".to_string())
            }
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS SQS service configuration
    pub async fn sqs_client_config(&self) -> aws_sdk_sqs::Config {
        let aws_config = self.aws_config().await;
        (&aws_config).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    #[serial]
    fn environment_from_env() {
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn invalid_environment_panics() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn visibility_timeout_covers_the_full_retry_budget() {
        use crate::jobs::ProvisioningJob;

        let config = Environment::Development.queue_config();
        let visibility = u64::try_from(config.default_visibility_timeout).unwrap();
        let attempts_budget =
            u64::from(ProvisioningJob::MAX_ATTEMPTS) * ProvisioningJob::TIMEOUT.as_secs();

        assert!(visibility > attempts_budget);
    }

    #[test]
    #[serial]
    fn development_forces_path_style_and_localstack_endpoint() {
        env::remove_var("TENANT_BUCKETS_ENDPOINT");
        env::remove_var("TENANT_BUCKETS_PATH_STYLE");

        let config = Environment::Development.store_endpoint_config();
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert!(config.path_style);
    }
}
