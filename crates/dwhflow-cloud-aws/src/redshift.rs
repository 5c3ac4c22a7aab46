//! Redshift-backed warehouse provider

use crate::error::from_sdk;
use async_trait::async_trait;
use aws_sdk_redshift::types::Cluster;
use dwhflow_cloud::{
    ClusterDescriptor, ClusterSpec, CloudError, Endpoint, Result, WarehouseProvider,
};

pub struct RedshiftWarehouse {
    client: aws_sdk_redshift::Client,
}

impl RedshiftWarehouse {
    pub fn new(client: aws_sdk_redshift::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WarehouseProvider for RedshiftWarehouse {
    async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()> {
        let mut request = self
            .client
            .create_cluster()
            // HW
            .cluster_type(&spec.cluster_type)
            .node_type(&spec.node_type)
            // Identifiers & Credentials
            .db_name(&spec.db_name)
            .cluster_identifier(&spec.identifier)
            .master_username(&spec.master_username)
            .master_user_password(&spec.master_password)
            .port(i32::from(spec.port))
            .publicly_accessible(spec.publicly_accessible)
            // Roles (for s3 access)
            .iam_roles(&spec.role_arn);

        // single-node clusters reject NumberOfNodes
        if spec.is_multi_node() {
            request = request.set_number_of_nodes(spec.number_of_nodes);
        }

        request
            .send()
            .await
            .map_err(|e| from_sdk("CreateCluster", e))?;
        Ok(())
    }

    async fn describe_cluster(&self, identifier: &str) -> Result<ClusterDescriptor> {
        let output = self
            .client
            .describe_clusters()
            .cluster_identifier(identifier)
            .send()
            .await
            .map_err(|e| from_sdk("DescribeClusters", e))?;

        output
            .clusters()
            .first()
            .map(|cluster| descriptor_from(cluster, identifier))
            .ok_or_else(|| CloudError::ResourceNotFound(format!("cluster {}", identifier)))
    }

    async fn delete_cluster(&self, identifier: &str, skip_final_snapshot: bool) -> Result<()> {
        self.client
            .delete_cluster()
            .cluster_identifier(identifier)
            .skip_final_cluster_snapshot(skip_final_snapshot)
            .send()
            .await
            .map_err(|e| from_sdk("DeleteCluster", e))?;
        Ok(())
    }
}

fn descriptor_from(cluster: &Cluster, requested_identifier: &str) -> ClusterDescriptor {
    ClusterDescriptor {
        identifier: cluster
            .cluster_identifier()
            .unwrap_or(requested_identifier)
            .to_string(),
        status: cluster.cluster_status().unwrap_or_default().to_string(),
        endpoint: cluster.endpoint().and_then(|endpoint| {
            endpoint.address().map(|address| Endpoint {
                address: address.to_string(),
                port: endpoint.port().and_then(|p| u16::try_from(p).ok()),
            })
        }),
        vpc_id: cluster.vpc_id().map(str::to_string),
    }
}
