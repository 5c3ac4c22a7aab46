//! Provider trait definitions
//!
//! One trait per cloud surface the tool touches. The AWS crate implements
//! them on top of the SDK clients; tests implement them in memory.

use crate::error::Result;
use crate::model::{
    ClusterDescriptor, ClusterSpec, ConnectionTarget, IngressRule, RoleSpec, SecurityGroup,
};
use async_trait::async_trait;

/// Identity roles and their attached policies
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a role trusted by the warehouse service
    ///
    /// Returns `CloudError::ResourceAlreadyExists` when a role with the same
    /// name is already present.
    async fn create_role(&self, spec: &RoleSpec) -> Result<()>;

    /// Attach a managed policy (idempotent on the provider side)
    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()>;

    /// Look up the role ARN
    async fn get_role_arn(&self, role_name: &str) -> Result<String>;

    async fn detach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()>;

    async fn delete_role(&self, role_name: &str) -> Result<()>;
}

/// Data-warehouse clusters
#[async_trait]
pub trait WarehouseProvider: Send + Sync {
    /// Request creation; returns before the cluster is usable
    async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()>;

    async fn describe_cluster(&self, identifier: &str) -> Result<ClusterDescriptor>;

    async fn delete_cluster(&self, identifier: &str, skip_final_snapshot: bool) -> Result<()>;
}

/// VPC security groups
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Security groups of a VPC, in the order the provider returns them
    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>>;

    async fn authorize_ingress(&self, group: &SecurityGroup, rule: &IngressRule) -> Result<()>;
}

/// One-shot database connectivity check
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    async fn probe(&self, target: &ConnectionTarget) -> Result<()>;
}
