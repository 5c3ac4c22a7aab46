//! Typed view of `dwh.cfg`
//!
//! The file is INI with `[AWS]`, `[CLUSTER]`, `[DB]`, `[IP]` and an optional
//! `[POLL]` section. Keys are matched case-insensitively. Any key can be
//! overridden from the environment as `DWH_<SECTION>__<KEY>`,
//! e.g. `DWH_DB__DB_PASSWORD`.

use crate::error::{ConfigError, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Source};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "DWH";

/// Complete, immutable run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub aws: AwsSettings,
    pub cluster: ClusterSettings,
    pub db: DbSettings,
    #[serde(rename = "ip")]
    pub ingress: IngressSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

#[derive(Clone, Deserialize)]
pub struct AwsSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSettings {
    #[serde(rename = "dwh_cluster_type")]
    pub cluster_type: String,
    #[serde(rename = "dwh_node_type")]
    pub node_type: String,
    #[serde(rename = "dwh_num_nodes", default)]
    pub num_nodes: Option<i32>,
    pub region: String,
    #[serde(rename = "dwh_cluster_identifier")]
    pub identifier: String,
    #[serde(rename = "dwh_iam_role_name")]
    pub iam_role_name: String,
}

#[derive(Clone, Deserialize)]
pub struct DbSettings {
    #[serde(rename = "db_name")]
    pub name: String,
    #[serde(rename = "db_user")]
    pub user: String,
    #[serde(rename = "db_password")]
    pub password: String,
    #[serde(rename = "db_port")]
    port_value: i64,
    /// Checked `DB_PORT`
    #[serde(skip)]
    pub port: u16,
}

impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

/// Source address allowed to reach the database port
#[derive(Debug, Clone, Deserialize)]
pub struct IngressSettings {
    pub ip_address: String,
    #[serde(rename = "permission_group")]
    group_value: i64,
    /// CIDR prefix length
    #[serde(skip)]
    pub permission_group: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interval_secs() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Load from an INI file, then apply `DWH_*` environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading settings from {}", path.display());
        Self::build(lowercased(File::from(path).format(FileFormat::Ini))?)
    }

    /// Parse INI text, then apply `DWH_*` environment overrides
    pub fn from_ini_str(content: &str) -> Result<Self> {
        Self::build(lowercased(File::from_str(content, FileFormat::Ini))?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let mut settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&mut self) -> Result<()> {
        self.db.port = match u16::try_from(self.db.port_value) {
            Ok(port) if port != 0 => port,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "DB_PORT must be between 1 and 65535, got {}",
                    self.db.port_value
                )));
            }
        };
        self.ingress.permission_group = match u8::try_from(self.ingress.group_value) {
            Ok(size) if size <= 32 => size,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "PERMISSION_GROUP must be a prefix length between 0 and 32, got {}",
                    self.ingress.group_value
                )));
            }
        };
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "POLL INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }
        if let Some(nodes) = self.cluster.num_nodes
            && nodes < 1
        {
            return Err(ConfigError::Invalid(format!(
                "DWH_NUM_NODES must be at least 1, got {}",
                nodes
            )));
        }
        Ok(())
    }
}

/// Re-key an INI source with lowercase sections and keys
///
/// The INI reader keeps keys as written while `Environment` lowercases them.
/// File values become builder defaults so the environment still wins.
fn lowercased<S>(source: S) -> Result<ConfigBuilder<DefaultState>>
where
    S: Source + Send + Sync + 'static,
{
    let mut builder = Config::builder();
    for (section, value) in source.collect()? {
        let section = section.to_lowercase();
        match value.clone().into_table() {
            Ok(table) => {
                for (key, value) in table {
                    builder =
                        builder.set_default(format!("{}.{}", section, key.to_lowercase()), value)?;
                }
            }
            Err(_) => builder = builder.set_default(section, value)?,
        }
    }
    Ok(builder)
}
