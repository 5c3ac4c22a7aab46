//! Identity role provisioning

use crate::error::Result;
use crate::model::{RoleHandle, RoleSpec};
use crate::provider::IdentityProvider;

/// Make sure the warehouse role exists with the storage policy attached
///
/// An existing role is reused. Any other creation error aborts.
pub async fn ensure_role(identity: &dyn IdentityProvider, spec: &RoleSpec) -> Result<RoleHandle> {
    let created = match identity.create_role(spec).await {
        Ok(()) => {
            tracing::info!("Created IAM role {}", spec.name);
            true
        }
        Err(e) if e.is_duplicate() => {
            tracing::warn!("IAM role {} already exists: {}", spec.name, e);
            false
        }
        Err(e) => return Err(e),
    };

    identity
        .attach_role_policy(&spec.name, &spec.policy_arn)
        .await?;
    tracing::debug!("Attached {} to {}", spec.policy_arn, spec.name);

    let arn = identity.get_role_arn(&spec.name).await?;
    tracing::info!("Role {} resolved to {}", spec.name, arn);

    Ok(RoleHandle {
        name: spec.name.clone(),
        arn,
        created,
    })
}
