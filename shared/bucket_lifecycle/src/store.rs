//! Object store client boundary
//!
//! [`ObjectStore`] is the seam between the lifecycle manager and the
//! S3-compatible provider. The production implementation wraps the AWS SDK
//! client; it performs a single blocking-call-equivalent attempt per
//! invocation and never retries internally; retry is owned by the job
//! wrapper layer.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::create_bucket::{CreateBucketError, CreateBucketOutput},
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client as S3Client,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{StoreCredentials, StoreEndpointConfig};

const OPERATION_TIMEOUT_SECS: u64 = 30;

/// Classification of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// 4xx-class failure (auth, already-exists on foreign account, not-found)
    Client,
    /// 5xx-class failure (throttling, internal provider error)
    Server,
    /// Transport or construction failure with no HTTP status
    Unknown,
}

/// A transport/provider-level failure from the object store
///
/// Captured once at the failure site; carries the provider's own code and
/// message plus the raw response payload for telemetry.
#[derive(Error, Debug, Clone)]
#[error("{message} (code: {code})", code = .code.as_deref().unwrap_or("unknown"))]
pub struct ProviderError {
    /// Provider error code, e.g. `BucketAlreadyExists`
    pub code: Option<String>,
    /// Client/server classification
    pub kind: ProviderErrorKind,
    /// Human-readable provider message
    pub message: String,
    /// Raw response payload, for diagnostics only
    pub raw_response: Option<String>,
}

impl ProviderError {
    fn from_sdk_error<E>(err: &SdkError<E>) -> Self
    where
        E: ProvideErrorMetadata + std::fmt::Debug,
    {
        let kind = match err {
            SdkError::ServiceError(service_err) => {
                if service_err.raw().status().as_u16() >= 500 {
                    ProviderErrorKind::Server
                } else {
                    ProviderErrorKind::Client
                }
            }
            _ => ProviderErrorKind::Unknown,
        };

        Self {
            code: err.code().map(ToString::to_string),
            kind,
            message: err
                .message()
                .map_or_else(|| format!("{err}"), ToString::to_string),
            raw_response: Some(format!("{err:?}")),
        }
    }
}

/// Result type alias for object store calls
pub type StoreResult<T> = Result<T, ProviderError>;

/// Create/delete operations against an S3-compatible object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Creates the named bucket
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider rejects or fails the call.
    async fn create_bucket(&self, name: &str) -> StoreResult<()>;

    /// Deletes the named bucket
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider rejects or fails the call.
    async fn delete_bucket(&self, name: &str) -> StoreResult<()>;
}

/// AWS SDK backed object store client
pub struct S3ObjectStore {
    client: S3Client,
    region: String,
}

impl S3ObjectStore {
    /// Builds a client from resolved credentials and endpoint configuration
    ///
    /// SDK-level retries are disabled: a failed call surfaces immediately so
    /// the job wrapper's retry budget stays the single retry boundary.
    pub async fn connect(credentials: &StoreCredentials, endpoint: &StoreEndpointConfig) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(OPERATION_TIMEOUT_SECS))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(Credentials::from_keys(
                credentials.access_key.clone(),
                credentials.secret_key.clone(),
                None,
            ))
            .region(Region::new(endpoint.region.clone()))
            .retry_config(RetryConfig::disabled())
            .timeout_config(timeout_config);

        if let Some(url) = &endpoint.endpoint_url {
            loader = loader.endpoint_url(url);
        }

        let aws_config = loader.load().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Path-style addressing for MinIO / LocalStack style deployments
        if endpoint.path_style {
            builder.set_force_path_style(Some(true));
        }

        info!(
            region = %endpoint.region,
            api_version = %endpoint.api_version,
            path_style = endpoint.path_style,
            "Initialized S3 object store client"
        );

        Self {
            client: S3Client::from_conf(builder.build()),
            region: endpoint.region.clone(),
        }
    }

    /// Wraps a pre-configured S3 client
    #[must_use]
    pub fn from_client(client: S3Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    fn settle_create(
        name: &str,
        result: Result<CreateBucketOutput, SdkError<CreateBucketError>>,
    ) -> StoreResult<()> {
        match result {
            Ok(_) => Ok(()),
            // A bucket we already own means a prior attempt succeeded; a
            // retried job converges instead of failing permanently.
            Err(SdkError::ServiceError(service_err))
                if matches!(
                    service_err.err(),
                    CreateBucketError::BucketAlreadyOwnedByYou(_)
                ) =>
            {
                debug!(bucket = name, "Bucket already owned, treating as created");
                Ok(())
            }
            Err(e) => Err(ProviderError::from_sdk_error(&e)),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn create_bucket(&self, name: &str) -> StoreResult<()> {
        debug!(bucket = name, "Creating bucket");

        let mut request = self.client.create_bucket().bucket(name);

        // Regions other than us-east-1 need an explicit location constraint
        if self.region != "us-east-1" {
            let constraint = BucketLocationConstraint::from(self.region.as_str());
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        Self::settle_create(name, request.send().await)
    }

    async fn delete_bucket(&self, name: &str) -> StoreResult<()> {
        debug!(bucket = name, "Deleting bucket");

        self.client
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::from_sdk_error(&e))
    }
}
