//! In-memory providers recording every call in one shared log

use async_trait::async_trait;
use dwhflow_cloud::{
    ClusterDescriptor, ClusterSpec, CloudError, ConnectionProbe, ConnectionTarget, Endpoint,
    IdentityProvider, IngressRule, NetworkProvider, Result, RoleSpec, SecurityGroup,
    WarehouseProvider,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub struct FakeIdentity {
    pub log: CallLog,
    pub roles: Mutex<Vec<String>>,
    pub attached: Mutex<Vec<(String, String)>>,
}

impl FakeIdentity {
    pub fn new(log: &CallLog, existing_roles: &[&str]) -> Self {
        Self {
            log: log.clone(),
            roles: Mutex::new(existing_roles.iter().map(|r| r.to_string()).collect()),
            attached: Mutex::new(Vec::new()),
        }
    }

    fn arn(name: &str) -> String {
        format!("arn:aws:iam::123456789012:role/{}", name)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn create_role(&self, spec: &RoleSpec) -> Result<()> {
        self.log.lock().unwrap().push(format!("create_role {}", spec.name));
        let mut roles = self.roles.lock().unwrap();
        if roles.contains(&spec.name) {
            return Err(CloudError::from_code(
                Some("EntityAlreadyExists"),
                format!("Role with name {} already exists.", spec.name),
            ));
        }
        roles.push(spec.name.clone());
        Ok(())
    }

    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("attach_role_policy {}", role_name));
        let mut attached = self.attached.lock().unwrap();
        let entry = (role_name.to_string(), policy_arn.to_string());
        if !attached.contains(&entry) {
            attached.push(entry);
        }
        Ok(())
    }

    async fn get_role_arn(&self, role_name: &str) -> Result<String> {
        self.log.lock().unwrap().push(format!("get_role {}", role_name));
        if self.roles.lock().unwrap().iter().any(|r| r == role_name) {
            Ok(Self::arn(role_name))
        } else {
            Err(CloudError::from_code(Some("NoSuchEntity"), role_name))
        }
    }

    async fn detach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("detach_role_policy {}", role_name));
        self.attached
            .lock()
            .unwrap()
            .retain(|(r, p)| !(r == role_name && p == policy_arn));
        Ok(())
    }

    async fn delete_role(&self, role_name: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("delete_role {}", role_name));
        self.roles.lock().unwrap().retain(|r| r != role_name);
        Ok(())
    }
}

pub struct FakeWarehouse {
    pub log: CallLog,
    pub exists: Mutex<bool>,
    /// Statuses returned by successive describe calls; the last one repeats
    pub statuses: Mutex<VecDeque<String>>,
    pub created: Mutex<Option<ClusterSpec>>,
    pub vpc_id: Option<String>,
    /// Port reported on the endpoint once available
    pub endpoint_port: Option<u16>,
}

impl FakeWarehouse {
    pub fn new(log: &CallLog, exists: bool, statuses: &[&str]) -> Self {
        Self {
            log: log.clone(),
            exists: Mutex::new(exists),
            statuses: Mutex::new(statuses.iter().map(|s| s.to_string()).collect()),
            created: Mutex::new(None),
            vpc_id: Some("vpc-0a1b2c".to_string()),
            endpoint_port: Some(5439),
        }
    }

    pub fn describe_count(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with("describe_cluster"))
            .count()
    }
}

#[async_trait]
impl WarehouseProvider for FakeWarehouse {
    async fn create_cluster(&self, spec: &ClusterSpec) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("create_cluster {}", spec.identifier));
        let mut exists = self.exists.lock().unwrap();
        if *exists {
            return Err(CloudError::from_code(
                Some("ClusterAlreadyExists"),
                "Cluster already exists",
            ));
        }
        *exists = true;
        *self.created.lock().unwrap() = Some(spec.clone());
        Ok(())
    }

    async fn describe_cluster(&self, identifier: &str) -> Result<ClusterDescriptor> {
        self.log
            .lock()
            .unwrap()
            .push(format!("describe_cluster {}", identifier));
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap_or_default()
        } else {
            statuses.front().cloned().unwrap_or_default()
        };
        let endpoint = (status == "available").then(|| Endpoint {
            address: format!("{}.abc123.us-west-2.redshift.amazonaws.com", identifier),
            port: self.endpoint_port,
        });
        Ok(ClusterDescriptor {
            identifier: identifier.to_string(),
            status,
            endpoint,
            vpc_id: self.vpc_id.clone(),
        })
    }

    async fn delete_cluster(&self, identifier: &str, skip_final_snapshot: bool) -> Result<()> {
        self.log.lock().unwrap().push(format!(
            "delete_cluster {} skip_final_snapshot={}",
            identifier, skip_final_snapshot
        ));
        let mut exists = self.exists.lock().unwrap();
        if !*exists {
            return Err(CloudError::from_code(Some("ClusterNotFound"), identifier));
        }
        *exists = false;
        Ok(())
    }
}

pub struct FakeNetwork {
    pub log: CallLog,
    pub groups: Vec<SecurityGroup>,
}

impl FakeNetwork {
    pub fn new(log: &CallLog, group_ids: &[&str]) -> Self {
        Self {
            log: log.clone(),
            groups: group_ids
                .iter()
                .map(|id| SecurityGroup {
                    group_id: id.to_string(),
                    group_name: Some("default".to_string()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl NetworkProvider for FakeNetwork {
    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>> {
        self.log
            .lock()
            .unwrap()
            .push(format!("security_groups {}", vpc_id));
        Ok(self.groups.clone())
    }

    async fn authorize_ingress(&self, group: &SecurityGroup, rule: &IngressRule) -> Result<()> {
        self.log.lock().unwrap().push(format!(
            "authorize_ingress {} tcp {} {}",
            group.group_id,
            rule.port,
            rule.cidr()
        ));
        Ok(())
    }
}

pub struct FakeProbe {
    pub log: CallLog,
    pub reachable: bool,
}

#[async_trait]
impl ConnectionProbe for FakeProbe {
    async fn probe(&self, target: &ConnectionTarget) -> Result<()> {
        self.log.lock().unwrap().push(format!("probe {}", target));
        if self.reachable {
            Ok(())
        } else {
            Err(CloudError::ConnectionFailed("Connection not valid".to_string()))
        }
    }
}
