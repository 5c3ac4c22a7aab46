//! Opening the database port on the cluster's VPC

use crate::error::{CloudError, Result};
use crate::model::{ClusterDescriptor, IngressRule, SecurityGroup};
use crate::provider::NetworkProvider;
use serde::{Deserialize, Serialize};

/// What happened when opening the port
///
/// Failures are reported here instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum IngressOutcome {
    Opened { group_id: String, cidr: String },
    AlreadyOpen { group_id: String, cidr: String },
    Failed { reason: String },
}

impl IngressOutcome {
    pub fn is_open(&self) -> bool {
        !matches!(self, IngressOutcome::Failed { .. })
    }
}

impl std::fmt::Display for IngressOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngressOutcome::Opened { group_id, cidr } => write!(f, "opened {} on {}", cidr, group_id),
            IngressOutcome::AlreadyOpen { group_id, cidr } => {
                write!(f, "{} already open on {}", cidr, group_id)
            }
            IngressOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Authorize inbound TCP on `rule.port` from `rule.cidr()` on the first security group of the cluster's VPC
pub async fn open_ingress(
    network: &dyn NetworkProvider,
    cluster: &ClusterDescriptor,
    rule: &IngressRule,
) -> IngressOutcome {
    match try_open_ingress(network, cluster, rule).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Could not open port {}: {}", rule.port, e);
            IngressOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn try_open_ingress(
    network: &dyn NetworkProvider,
    cluster: &ClusterDescriptor,
    rule: &IngressRule,
) -> Result<IngressOutcome> {
    let vpc_id = cluster.vpc_id.as_deref().ok_or_else(|| {
        CloudError::ResourceNotFound(format!("cluster {} has no VPC", cluster.identifier))
    })?;

    let group = first_group(network.security_groups(vpc_id).await?)
        .ok_or_else(|| CloudError::ResourceNotFound(format!("no security group in {}", vpc_id)))?;

    let cidr = rule.cidr();
    match network.authorize_ingress(&group, rule).await {
        Ok(()) => {
            tracing::info!(
                "Opened TCP {} from {} on {} ({})",
                rule.port,
                cidr,
                group.group_id,
                group.group_name.as_deref().unwrap_or("unnamed")
            );
            Ok(IngressOutcome::Opened {
                group_id: group.group_id,
                cidr,
            })
        }
        Err(e) if e.is_duplicate() => {
            tracing::info!("Ingress rule {} already present on {}", cidr, group.group_id);
            Ok(IngressOutcome::AlreadyOpen {
                group_id: group.group_id,
                cidr,
            })
        }
        Err(e) => Err(e),
    }
}

// No selection logic: the provider's first group wins.
fn first_group(groups: Vec<SecurityGroup>) -> Option<SecurityGroup> {
    groups.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticNetwork {
        groups: Vec<SecurityGroup>,
        /// Error code returned by authorize_ingress
        authorize_error: Option<&'static str>,
        authorized: Mutex<Vec<(String, String)>>,
    }

    impl StaticNetwork {
        fn new(groups: Vec<SecurityGroup>) -> Self {
            Self {
                groups,
                authorize_error: None,
                authorized: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NetworkProvider for StaticNetwork {
        async fn security_groups(&self, _vpc_id: &str) -> Result<Vec<SecurityGroup>> {
            Ok(self.groups.clone())
        }

        async fn authorize_ingress(&self, group: &SecurityGroup, rule: &IngressRule) -> Result<()> {
            if let Some(code) = self.authorize_error {
                return Err(CloudError::from_code(Some(code), "denied"));
            }
            self.authorized
                .lock()
                .unwrap()
                .push((group.group_id.clone(), rule.cidr()));
            Ok(())
        }
    }

    fn group(id: &str) -> SecurityGroup {
        SecurityGroup {
            group_id: id.to_string(),
            group_name: Some("default".to_string()),
        }
    }

    fn cluster(vpc_id: Option<&str>) -> ClusterDescriptor {
        ClusterDescriptor {
            identifier: "dwhCluster".to_string(),
            status: "available".to_string(),
            endpoint: None,
            vpc_id: vpc_id.map(str::to_string),
        }
    }

    fn rule() -> IngressRule {
        IngressRule {
            port: 5439,
            source_ip: "0.0.0.0".to_string(),
            cidr_size: 0,
        }
    }

    #[tokio::test]
    async fn test_first_group_is_used() {
        let network = StaticNetwork::new(vec![group("sg-1"), group("sg-2")]);

        let outcome = open_ingress(&network, &cluster(Some("vpc-1")), &rule()).await;

        assert_eq!(
            outcome,
            IngressOutcome::Opened {
                group_id: "sg-1".to_string(),
                cidr: "0.0.0.0/0".to_string(),
            }
        );
        assert_eq!(
            *network.authorized.lock().unwrap(),
            vec![("sg-1".to_string(), "0.0.0.0/0".to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_security_group_is_not_fatal() {
        let network = StaticNetwork::new(Vec::new());

        let outcome = open_ingress(&network, &cluster(Some("vpc-1")), &rule()).await;

        assert!(!outcome.is_open());
        assert!(matches!(outcome, IngressOutcome::Failed { ref reason } if reason.contains("vpc-1")));
    }

    #[tokio::test]
    async fn test_missing_vpc_is_not_fatal() {
        let network = StaticNetwork::new(vec![group("sg-1")]);

        let outcome = open_ingress(&network, &cluster(None), &rule()).await;

        assert!(matches!(outcome, IngressOutcome::Failed { .. }));
        assert!(network.authorized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_rule_counts_as_open() {
        let mut network = StaticNetwork::new(vec![group("sg-1")]);
        network.authorize_error = Some("InvalidPermission.Duplicate");

        let outcome = open_ingress(&network, &cluster(Some("vpc-1")), &rule()).await;

        assert!(outcome.is_open());
        assert!(matches!(outcome, IngressOutcome::AlreadyOpen { .. }));
    }

    #[tokio::test]
    async fn test_api_error_is_swallowed() {
        let mut network = StaticNetwork::new(vec![group("sg-1")]);
        network.authorize_error = Some("UnauthorizedOperation");

        let outcome = open_ingress(&network, &cluster(Some("vpc-1")), &rule()).await;

        assert_eq!(
            outcome,
            IngressOutcome::Failed {
                reason: "API error: UnauthorizedOperation: denied".to_string()
            }
        );
    }
}
