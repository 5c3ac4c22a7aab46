//! End-to-end provisioning and teardown sequences

use crate::cluster::{ensure_cluster, wait_for_available};
use crate::error::{CloudError, Result};
use crate::ingress::{IngressOutcome, open_ingress};
use crate::model::{
    ClusterDescriptor, ClusterRequest, ClusterSpec, ConnectionTarget, IngressRule, PollPolicy,
    RoleHandle, RoleSpec,
};
use crate::poll::PollOutcome;
use crate::provider::{ConnectionProbe, IdentityProvider, NetworkProvider, WarehouseProvider};
use crate::role::ensure_role;
use crate::teardown::{TeardownReport, teardown};

/// Everything a run needs to know, derived once from the settings
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub role: RoleSpec,

    /// Cluster request; `role_arn` is filled in after the role is provisioned
    pub cluster: ClusterSpec,

    pub ingress: IngressRule,

    pub poll: PollPolicy,
}

impl DeploymentPlan {
    fn connection_target(&self, host: &str, port: u16) -> ConnectionTarget {
        ConnectionTarget {
            host: host.to_string(),
            port,
            db_name: self.cluster.db_name.clone(),
            user: self.cluster.master_username.clone(),
            password: self.cluster.master_password.clone(),
        }
    }
}

/// Service handles used by a run
#[derive(Clone, Copy)]
pub struct Providers<'a> {
    pub identity: &'a dyn IdentityProvider,
    pub warehouse: &'a dyn WarehouseProvider,
    pub network: &'a dyn NetworkProvider,
    pub probe: &'a dyn ConnectionProbe,
}

/// What a successful provisioning run produced
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub role: RoleHandle,
    pub cluster_request: ClusterRequest,
    pub cluster: ClusterDescriptor,
    /// Endpoint host the connectivity check succeeded against
    pub endpoint: String,
    pub ingress: IngressOutcome,
}

/// Role, cluster, wait for availability, open ingress, check connectivity
pub async fn provision(providers: Providers<'_>, plan: &DeploymentPlan) -> Result<ProvisionReport> {
    let role = ensure_role(providers.identity, &plan.role).await?;

    let spec = ClusterSpec {
        role_arn: role.arn.clone(),
        ..plan.cluster.clone()
    };
    let cluster_request = ensure_cluster(providers.warehouse, &spec).await?;

    let cluster = match wait_for_available(providers.warehouse, &spec.identifier, &plan.poll).await? {
        PollOutcome::Ready(cluster) => cluster,
        PollOutcome::TimedOut(last) => {
            tracing::error!("Could not connect to cluster {}", last.identifier);
            return Err(CloudError::Timeout(format!(
                "Could not connect to cluster {}: still \"{}\" after {:?}",
                last.identifier, last.status, plan.poll.timeout
            )));
        }
    };

    let endpoint = cluster
        .endpoint_address()
        .ok_or_else(|| {
            CloudError::ResourceNotFound(format!(
                "cluster {} is available but has no endpoint",
                cluster.identifier
            ))
        })?
        .to_string();
    tracing::info!("Cluster created at {}", endpoint);

    let ingress = open_ingress(providers.network, &cluster, &plan.ingress).await;

    // the cluster's reported port wins over the requested one
    let port = cluster
        .endpoint
        .as_ref()
        .and_then(|e| e.port)
        .unwrap_or(plan.cluster.port);
    let target = plan.connection_target(&endpoint, port);
    providers.probe.probe(&target).await?;

    Ok(ProvisionReport {
        role,
        cluster_request,
        cluster,
        endpoint,
        ingress,
    })
}

/// Remove the cluster and the role; never polls
pub async fn decommission(providers: Providers<'_>, plan: &DeploymentPlan) -> TeardownReport {
    teardown(
        providers.warehouse,
        providers.identity,
        &plan.cluster.identifier,
        &plan.role.name,
        &plan.role.policy_arn,
    )
    .await
}
