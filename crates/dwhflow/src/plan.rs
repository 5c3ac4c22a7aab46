//! Settings → cloud-facing plan

use dwhflow_cloud::{ClusterSpec, DeploymentPlan, IngressRule, PollPolicy, RoleSpec};
use dwhflow_cloud_aws::AwsCredentials;
use dwhflow_config::Settings;

pub fn credentials(settings: &Settings) -> AwsCredentials {
    AwsCredentials {
        access_key_id: settings.aws.access_key_id.clone(),
        secret_access_key: settings.aws.secret_access_key.clone(),
        region: settings.cluster.region.clone(),
    }
}

pub fn deployment_plan(settings: &Settings) -> DeploymentPlan {
    DeploymentPlan {
        role: RoleSpec::new(&settings.cluster.iam_role_name),
        cluster: ClusterSpec {
            identifier: settings.cluster.identifier.clone(),
            cluster_type: settings.cluster.cluster_type.clone(),
            node_type: settings.cluster.node_type.clone(),
            number_of_nodes: settings.cluster.num_nodes,
            db_name: settings.db.name.clone(),
            master_username: settings.db.user.clone(),
            master_password: settings.db.password.clone(),
            port: settings.db.port,
            // ロール作成後に埋まる
            role_arn: String::new(),
            publicly_accessible: true,
        },
        ingress: IngressRule {
            port: settings.db.port,
            source_ip: settings.ingress.ip_address.clone(),
            cidr_size: settings.ingress.permission_group,
        },
        poll: PollPolicy::new(settings.poll.interval(), settings.poll.timeout()),
    }
}
