//! EC2-backed network provider (VPC security groups)

use crate::error::from_sdk;
use async_trait::async_trait;
use aws_sdk_ec2::types::{Filter, IpPermission, IpRange};
use dwhflow_cloud::{IngressRule, NetworkProvider, Result, SecurityGroup};

const RULE_DESCRIPTION: &str = "dwhflow database access";

pub struct Ec2Network {
    client: aws_sdk_ec2::Client,
}

impl Ec2Network {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NetworkProvider for Ec2Network {
    async fn security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>> {
        let output = self
            .client
            .describe_security_groups()
            .filters(Filter::builder().name("vpc-id").values(vpc_id).build())
            .send()
            .await
            .map_err(|e| from_sdk("DescribeSecurityGroups", e))?;

        Ok(output
            .security_groups()
            .iter()
            .filter_map(|group| {
                Some(SecurityGroup {
                    group_id: group.group_id()?.to_string(),
                    group_name: group.group_name().map(str::to_string),
                })
            })
            .collect())
    }

    async fn authorize_ingress(&self, group: &SecurityGroup, rule: &IngressRule) -> Result<()> {
        self.client
            .authorize_security_group_ingress()
            .group_id(&group.group_id)
            .ip_permissions(tcp_permission(rule))
            .send()
            .await
            .map_err(|e| from_sdk("AuthorizeSecurityGroupIngress", e))?;
        Ok(())
    }
}

fn tcp_permission(rule: &IngressRule) -> IpPermission {
    IpPermission::builder()
        .ip_protocol("tcp")
        .from_port(i32::from(rule.port))
        .to_port(i32::from(rule.port))
        .ip_ranges(
            IpRange::builder()
                .cidr_ip(rule.cidr())
                .description(RULE_DESCRIPTION)
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcp_permission() {
        let rule = IngressRule {
            port: 5439,
            source_ip: "198.51.100.4".to_string(),
            cidr_size: 32,
        };

        let permission = tcp_permission(&rule);

        assert_eq!(permission.ip_protocol(), Some("tcp"));
        assert_eq!(permission.from_port(), Some(5439));
        assert_eq!(permission.to_port(), Some(5439));
        assert_eq!(permission.ip_ranges().len(), 1);
        assert_eq!(permission.ip_ranges()[0].cidr_ip(), Some("198.51.100.4/32"));
    }
}
