//! IAM-backed identity provider

use crate::error::from_sdk;
use async_trait::async_trait;
use dwhflow_cloud::{CloudError, IdentityProvider, Result, RoleSpec};

pub struct IamIdentity {
    client: aws_sdk_iam::Client,
}

impl IamIdentity {
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for IamIdentity {
    async fn create_role(&self, spec: &RoleSpec) -> Result<()> {
        let trust_policy = serde_json::to_string(&spec.trust_policy())?;

        self.client
            .create_role()
            .path("/")
            .role_name(&spec.name)
            .description(&spec.description)
            .assume_role_policy_document(trust_policy)
            .send()
            .await
            .map_err(|e| from_sdk("CreateRole", e))?;
        Ok(())
    }

    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.client
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| from_sdk("AttachRolePolicy", e))?;
        Ok(())
    }

    async fn get_role_arn(&self, role_name: &str) -> Result<String> {
        let output = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| from_sdk("GetRole", e))?;

        output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| CloudError::ResourceNotFound(format!("role {}", role_name)))
    }

    async fn detach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.client
            .detach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| from_sdk("DetachRolePolicy", e))?;
        Ok(())
    }

    async fn delete_role(&self, role_name: &str) -> Result<()> {
        self.client
            .delete_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| from_sdk("DeleteRole", e))?;
        Ok(())
    }
}
