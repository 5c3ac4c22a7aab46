//! AWS provider for dwhflow
//!
//! Implements the `dwhflow-cloud` provider traits on top of the AWS SDK:
//!
//! - IAM for the cluster role
//! - Redshift for the cluster itself
//! - EC2 for the VPC security group ingress rule
//!
//! plus a Postgres-protocol connectivity probe for the cluster endpoint.
//!
//! # Example
//!
//! ```ignore
//! use dwhflow_cloud_aws::{AwsClients, AwsCredentials, PostgresProbe};
//! use dwhflow_cloud::{Providers, provision};
//!
//! let clients = AwsClients::connect(&credentials).await;
//! let (identity, warehouse, network) =
//!     (clients.identity(), clients.warehouse(), clients.network());
//! let providers = Providers {
//!     identity: &identity,
//!     warehouse: &warehouse,
//!     network: &network,
//!     probe: &PostgresProbe,
//! };
//! let report = provision(providers, &plan).await?;
//! ```

pub mod clients;
pub mod ec2;
mod error;
pub mod iam;
pub mod probe;
pub mod redshift;

pub use clients::{AwsClients, AwsCredentials};
pub use ec2::Ec2Network;
pub use iam::IamIdentity;
pub use probe::PostgresProbe;
pub use redshift::RedshiftWarehouse;
