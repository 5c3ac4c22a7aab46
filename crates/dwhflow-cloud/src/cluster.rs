//! Cluster creation and availability

use crate::error::Result;
use crate::model::{ClusterDescriptor, ClusterRequest, ClusterSpec, PollPolicy};
use crate::poll::{PollOutcome, poll_until};
use crate::provider::WarehouseProvider;

/// Request the cluster, treating an existing one with the same identifier as success
pub async fn ensure_cluster(
    warehouse: &dyn WarehouseProvider,
    spec: &ClusterSpec,
) -> Result<ClusterRequest> {
    match warehouse.create_cluster(spec).await {
        Ok(()) => {
            tracing::info!(
                "Requested {} cluster {} ({})",
                spec.cluster_type,
                spec.identifier,
                spec.node_type
            );
            Ok(ClusterRequest::Created)
        }
        Err(e) if e.is_duplicate() => {
            tracing::warn!("Cluster {} already exists: {}", spec.identifier, e);
            Ok(ClusterRequest::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

/// Sample the cluster status until it is `available` or the budget runs out
pub async fn wait_for_available(
    warehouse: &dyn WarehouseProvider,
    identifier: &str,
    policy: &PollPolicy,
) -> Result<PollOutcome<ClusterDescriptor>> {
    let max_attempts = policy.max_attempts();
    let mut samples = 0;
    poll_until(
        policy,
        move || warehouse.describe_cluster(identifier),
        |cluster: &ClusterDescriptor| {
            samples += 1;
            if let Some(message) = pending_message(cluster, samples, max_attempts, policy) {
                tracing::info!("{}", message);
            }
            cluster.is_available()
        },
    )
    .await
}

/// Status line for a cluster that is not ready yet; `None` on the final sample
fn pending_message(
    cluster: &ClusterDescriptor,
    sample: u32,
    max_attempts: u32,
    policy: &PollPolicy,
) -> Option<String> {
    if cluster.is_available() {
        return None;
    }
    if sample >= max_attempts {
        return Some(format!(
            "Cluster status is \"{}\". Giving up.",
            cluster.status
        ));
    }
    Some(format!(
        "Cluster status is \"{}\". Retrying in {} seconds.",
        cluster.status,
        policy.interval.as_secs()
    ))
}
