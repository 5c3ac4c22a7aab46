//! Connectivity check over the Postgres wire protocol

use async_trait::async_trait;
use dwhflow_cloud::{CloudError, ConnectionProbe, ConnectionTarget, Result};
use tokio_postgres::NoTls;

/// Opens one connection with driver defaults and closes it again
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresProbe;

#[async_trait]
impl ConnectionProbe for PostgresProbe {
    async fn probe(&self, target: &ConnectionTarget) -> Result<()> {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&target.host)
            .port(target.port)
            .dbname(&target.db_name)
            .user(&target.user)
            .password(&target.password);

        tracing::debug!("Connecting to {}", target);
        let (client, connection) = config.connect(NoTls).await.map_err(|e| {
            tracing::error!("Unable to connect to cluster: {}", e);
            CloudError::ConnectionFailed(format!("{}: {}", target, e))
        })?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!("Connection closed with error: {}", e);
            }
        });

        let result = if client.is_closed() {
            tracing::error!("Unable to connect to cluster");
            Err(CloudError::ConnectionFailed("Connection not valid".to_string()))
        } else {
            tracing::info!("Connected: {}@{}", target.user, target.db_name);
            Ok(())
        };

        drop(client);
        join_driver(driver).await;
        result
    }
}

/// Wait for the connection task after the client is dropped
///
/// Returns `false` when the task panicked or was cancelled.
async fn join_driver(driver: tokio::task::JoinHandle<()>) -> bool {
    match driver.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Connection task did not finish cleanly: {}", e);
            false
        }
    }
}
