use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use provisioner_worker::tenant_store::DynamoTenantStore;
use provisioner_worker::types::environment::Environment;
use provisioner_worker::worker::ProvisionerWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get environment
    let env = Environment::from_env();
    info!("Starting tenant bucket provisioner in {:?} environment", env);

    // Tenant persistence collaborator
    let dynamodb_client = Arc::new(DynamoDbClient::new(&env.aws_config().await));
    let tenants = Arc::new(DynamoTenantStore::new(
        dynamodb_client,
        env.tenant_table_name(),
    ));

    // Create and start the worker
    match ProvisionerWorker::new(env, tenants).await {
        Ok(worker) => {
            let shutdown_token = worker.shutdown_token();

            // Spawn signal handler
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Received Ctrl+C, initiating graceful shutdown...");
                        shutdown_token.cancel();
                    }
                    Err(e) => {
                        error!("Failed to listen for Ctrl+C: {}", e);
                    }
                }
            });

            if let Err(e) = worker.start().await {
                error!("Worker error: {}", e);
                return Err(e);
            }
        }
        Err(e) => {
            error!("Failed to create worker: {}", e);
            return Err(e);
        }
    }

    info!("Tenant bucket provisioner stopped");
    Ok(())
}
