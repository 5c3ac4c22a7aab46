//! SDK client construction from one credential/region bundle

use crate::ec2::Ec2Network;
use crate::iam::IamIdentity;
use crate::redshift::RedshiftWarehouse;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_iam::config::Credentials;

const CREDENTIALS_PROVIDER_NAME: &str = "dwhflow-config";

/// Static credentials read from the configuration file
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

/// The four service handles a run works with
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub ec2: aws_sdk_ec2::Client,
    /// Built alongside the others; the pipeline itself does not call S3
    pub s3: aws_sdk_s3::Client,
    pub iam: aws_sdk_iam::Client,
    pub redshift: aws_sdk_redshift::Client,
}

impl AwsClients {
    /// Build clients using the given static credentials and region
    pub async fn connect(credentials: &AwsCredentials) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None, // session token
            None, // no expiry
            CREDENTIALS_PROVIDER_NAME,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(provider)
            .load()
            .await;

        tracing::debug!("AWS clients configured for {}", credentials.region);
        Self::from_sdk_config(&sdk_config)
    }

    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self {
            ec2: aws_sdk_ec2::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            redshift: aws_sdk_redshift::Client::new(config),
        }
    }

    pub fn identity(&self) -> IamIdentity {
        IamIdentity::new(self.iam.clone())
    }

    pub fn warehouse(&self) -> RedshiftWarehouse {
        RedshiftWarehouse::new(self.redshift.clone())
    }

    pub fn network(&self) -> Ec2Network {
        Ec2Network::new(self.ec2.clone())
    }
}
