//! Best-effort removal of the cluster and its role
//!
//! Every step is attempted; errors are logged and recorded in the report,
//! never returned. Nothing waits for the cluster to actually disappear.

use crate::error::Result;
use crate::provider::{IdentityProvider, WarehouseProvider};
use serde::{Deserialize, Serialize};

/// Result of a single teardown step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Step name, e.g. "delete-cluster"
    pub step: String,

    /// Success message
    pub message: String,

    /// Error message if failed
    pub error: Option<String>,
}

/// Result of a teardown run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeardownReport {
    pub succeeded: Vec<StepResult>,
    pub failed: Vec<StepResult>,
}

impl TeardownReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn add_success(&mut self, step: impl Into<String>, message: impl Into<String>) {
        self.succeeded.push(StepResult {
            step: step.into(),
            message: message.into(),
            error: None,
        });
    }

    pub fn add_failure(&mut self, step: impl Into<String>, error: impl Into<String>) {
        self.failed.push(StepResult {
            step: step.into(),
            message: String::new(),
            error: Some(error.into()),
        });
    }

    fn record(&mut self, step: &str, result: Result<String>) {
        match result {
            Ok(message) => {
                tracing::info!("{}", message);
                self.add_success(step, message);
            }
            Err(e) => {
                tracing::error!("{} failed: {}", step, e);
                self.add_failure(step, e.to_string());
            }
        }
    }
}

impl std::fmt::Display for TeardownReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} step(s) succeeded, {} failed",
            self.succeeded.len(),
            self.failed.len()
        )
    }
}

pub const DELETE_CLUSTER_STEP: &str = "delete-cluster";
pub const DELETE_ROLE_STEP: &str = "delete-role";

/// Delete the cluster (no final snapshot), then detach and delete the role
pub async fn teardown(
    warehouse: &dyn WarehouseProvider,
    identity: &dyn IdentityProvider,
    cluster_id: &str,
    role_name: &str,
    policy_arn: &str,
) -> TeardownReport {
    let mut report = TeardownReport::new();

    let deleted = warehouse
        .delete_cluster(cluster_id, true)
        .await
        .map(|()| format!("Deleted cluster {}", cluster_id));
    report.record(DELETE_CLUSTER_STEP, deleted);

    let deleted = delete_role(identity, role_name, policy_arn).await;
    report.record(DELETE_ROLE_STEP, deleted);

    report
}

// Stops at the first failing call; the role cannot be deleted while the policy is attached.
async fn delete_role(
    identity: &dyn IdentityProvider,
    role_name: &str,
    policy_arn: &str,
) -> Result<String> {
    let role_arn = identity.get_role_arn(role_name).await?;
    identity.detach_role_policy(role_name, policy_arn).await?;
    identity.delete_role(role_name).await?;
    Ok(format!("Deleted role {} with {}", role_name, role_arn))
}
