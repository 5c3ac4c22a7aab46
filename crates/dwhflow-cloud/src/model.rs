//! Resource descriptions shared by the provisioning steps and the providers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Managed policy granting read-only access to object storage
pub const S3_READ_ONLY_POLICY_ARN: &str = "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess";

/// Service principal allowed to assume the warehouse role
pub const REDSHIFT_SERVICE_PRINCIPAL: &str = "redshift.amazonaws.com";

pub const DEFAULT_ROLE_DESCRIPTION: &str =
    "Allows Redshift clusters to call AWS services on your behalf.";

/// Status string the warehouse reports once a cluster accepts connections
pub const AVAILABLE_STATUS: &str = "available";

/// Identity role to create for the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    pub description: String,
    /// Policy attached after creation
    pub policy_arn: String,
}

impl RoleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_ROLE_DESCRIPTION.to_string(),
            policy_arn: S3_READ_ONLY_POLICY_ARN.to_string(),
        }
    }

    /// Trust policy letting the warehouse service assume this role
    pub fn trust_policy(&self) -> serde_json::Value {
        serde_json::json!({
            "Statement": [
                {
                    "Action": "sts:AssumeRole",
                    "Effect": "Allow",
                    "Principal": { "Service": REDSHIFT_SERVICE_PRINCIPAL }
                }
            ],
            "Version": "2012-10-17"
        })
    }
}

/// Role as it exists after provisioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHandle {
    pub name: String,
    pub arn: String,
    /// false when the role was already there before this run
    pub created: bool,
}

/// Cluster creation request
#[derive(Clone, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub identifier: String,
    pub cluster_type: String,
    pub node_type: String,
    /// Only sent for multi-node clusters
    pub number_of_nodes: Option<i32>,
    pub db_name: String,
    pub master_username: String,
    pub master_password: String,
    pub port: u16,
    pub role_arn: String,
    pub publicly_accessible: bool,
}

impl ClusterSpec {
    pub fn is_multi_node(&self) -> bool {
        self.cluster_type.eq_ignore_ascii_case("multi-node")
    }
}

impl std::fmt::Debug for ClusterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterSpec")
            .field("identifier", &self.identifier)
            .field("cluster_type", &self.cluster_type)
            .field("node_type", &self.node_type)
            .field("number_of_nodes", &self.number_of_nodes)
            .field("db_name", &self.db_name)
            .field("master_username", &self.master_username)
            .field("master_password", &"***")
            .field("port", &self.port)
            .field("role_arn", &self.role_arn)
            .field("publicly_accessible", &self.publicly_accessible)
            .finish()
    }
}

/// Network address of a running cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub address: String,
    pub port: Option<u16>,
}

/// Cluster as reported by the warehouse service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescriptor {
    pub identifier: String,
    pub status: String,
    pub endpoint: Option<Endpoint>,
    pub vpc_id: Option<String>,
}

impl ClusterDescriptor {
    pub fn is_available(&self) -> bool {
        self.status == AVAILABLE_STATUS
    }

    pub fn endpoint_address(&self) -> Option<&str> {
        self.endpoint.as_ref().map(|e| e.address.as_str())
    }
}

/// Outcome of a cluster creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterRequest {
    Created,
    AlreadyExists,
}

impl std::fmt::Display for ClusterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterRequest::Created => write!(f, "created"),
            ClusterRequest::AlreadyExists => write!(f, "already exists"),
        }
    }
}

/// Security group attached to a VPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: Option<String>,
}

/// Inbound TCP rule for the database port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    pub port: u16,
    pub source_ip: String,
    /// Prefix length, e.g. 32 for a single host, 0 for anywhere
    pub cidr_size: u8,
}

impl IngressRule {
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.source_ip, self.cidr_size)
    }
}

/// Where and how to open the test connection
#[derive(Clone)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    pub db_name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "postgresql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.db_name
        )
    }
}

impl std::fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConnectionTarget({})", self)
    }
}

/// Fixed-interval polling budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two samples
    pub interval: Duration,

    /// Total budget; together with `interval` this fixes the sample count
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Number of samples taken before giving up (never less than one)
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let attempts = self.timeout.as_millis() / self.interval.as_millis().max(1);
        u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            timeout: Duration::from_secs(600),
        }
    }
}
