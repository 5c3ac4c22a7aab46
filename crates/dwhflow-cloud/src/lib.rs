//! dwhflow cloud layer
//!
//! Provider abstraction and the provisioning pipeline for a Redshift data
//! warehouse: IAM role, cluster, availability polling, ingress and a
//! connectivity check, plus the matching teardown.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   dwh CLI                        │
//! │             (provision / teardown)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                dwhflow-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  pipeline: role → cluster → poll →       │   │
//! │  │            ingress → probe               │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait IdentityProvider / Warehouse-     │   │
//! │  │  Provider / NetworkProvider / Probe      │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │   dwhflow-cloud-aws (IAM, Redshift, EC2, SQL)    │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod cluster;
pub mod error;
pub mod ingress;
pub mod model;
pub mod pipeline;
pub mod poll;
pub mod provider;
pub mod role;
pub mod teardown;

// Re-exports
pub use cluster::{ensure_cluster, wait_for_available};
pub use error::{CloudError, ErrorKind, Result};
pub use ingress::{IngressOutcome, open_ingress};
pub use model::{
    AVAILABLE_STATUS, ClusterDescriptor, ClusterRequest, ClusterSpec, ConnectionTarget, Endpoint,
    IngressRule, PollPolicy, RoleHandle, RoleSpec, S3_READ_ONLY_POLICY_ARN, SecurityGroup,
};
pub use pipeline::{DeploymentPlan, ProvisionReport, Providers, decommission, provision};
pub use poll::{PollOutcome, poll_until};
pub use provider::{ConnectionProbe, IdentityProvider, NetworkProvider, WarehouseProvider};
pub use role::ensure_role;
pub use teardown::{StepResult, TeardownReport, teardown};
