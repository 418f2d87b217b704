//! DynamoDB-backed tenant persistence glue
//!
//! Thin adapter between the lifecycle manager's save seam and the
//! application's tenant table. Only the fields this worker touches are
//! written; the table itself is owned by the wider application.

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use bucket_lifecycle::{Tenant, TenantStore, TenantStoreError};

/// Tenant store writing records to a DynamoDB table
pub struct DynamoTenantStore {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DynamoTenantStore {
    /// Creates a store over a pre-configured client and table name
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }
}

#[async_trait::async_trait]
impl TenantStore for DynamoTenantStore {
    async fn save(&self, tenant: &Tenant) -> Result<(), TenantStoreError> {
        let item = serde_dynamo::to_item(tenant)
            .map_err(|e| TenantStoreError::SaveFailed(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| TenantStoreError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}
