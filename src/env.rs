//! Environment inputs consumed by the generator.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TfvarsError};

pub const CORAX_NODES: &str = "CORAX_NODES";
pub const CLOUDRU_PROJECT_ID: &str = "CLOUDRU_PROJECT_ID";
pub const GIS_PROJECT_NAME: &str = "GIS_PROJECT_NAME";
pub const CLUSTER_NUMBER: &str = "CLUSTER_NUMBER";
pub const CLUSTER_SUBNET: &str = "CLUSTER_SUBNET";
pub const CLUSTER_GATEWAY: &str = "CLUSTER_GATEWAY";
pub const USERS_SUBNET: &str = "USERS_SUBNET";
pub const INFRA_SUBNET_GITLAB: &str = "INFRA_SUBNET_GITLAB";
pub const INFRA_SUBNET_JUMPHOST: &str = "INFRA_SUBNET_JUMPHOST";
pub const KAFKA_BROKER_CPU: &str = "KAFKA_BROKER_CPU";
pub const KAFKA_BROKER_RAM: &str = "KAFKA_BROKER_RAM";
pub const KAFKA_BROKER_OVERSUBSCRIPTION: &str = "KAFKA_BROKER_OVERSUBSCRIPTION";
pub const KAFKA_BROKER_BOOT_DISK_SIZE: &str = "KAFKA_BROKER_BOOT_DISK_SIZE";
pub const KAFKA_BROKER_DISK_SIZE: &str = "KAFKA_BROKER_DISK_SIZE";
pub const CLOUDRU_KEY_ID: &str = "CLOUDRU_KEY_ID";
pub const CLOUDRU_SECRET: &str = "CLOUDRU_SECRET";
pub const USER_NAME: &str = "USER_NAME";
pub const USER_PASS: &str = "USER_PASS";
pub const USER_PUBLIC_KEY: &str = "USER_PUBLIC_KEY";
pub const HOME: &str = "HOME";

/// Source of named string values. The process environment in production,
/// a plain map in tests.
pub trait EnvLookup {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment.
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Look up a variable that must be set. An empty value still counts as set.
pub fn read_required_var(env: &dyn EnvLookup, name: &str) -> Result<String> {
    env.var(name).ok_or_else(|| TfvarsError::MissingVariable {
        name: name.to_string(),
    })
}

pub fn read_optional_var(env: &dyn EnvLookup, name: &str, default: &str) -> String {
    env.var(name).unwrap_or_else(|| {
        debug!(var = name, default, "using default");
        default.to_string()
    })
}

/// Broker VM sizing. Everything except oversubscription is rendered unquoted.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerSizing {
    pub cpu: String,
    pub ram: String,
    pub oversubscription: String,
    pub boot_disk_size: String,
    pub disk_size: String,
}

/// Network and project placement of the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterValues {
    pub cloudru_project_id: String,
    pub gis_project_name: String,
    pub cluster_number: String,
    pub cluster_subnet: String,
    pub cluster_gateway: String,
    pub users_subnet: String,
    pub infra_subnet_gitlab: String,
    pub infra_subnet_jumphost: String,
}

/// Cloud and VM user credentials.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub cloudru_key_id: String,
    pub cloudru_secret: String,
    pub user_name: String,
    pub user_pass: String,
}

// Keep secrets out of `{:?}` output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cloudru_key_id", &self.cloudru_key_id)
            .field("cloudru_secret", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("user_pass", &"<redacted>")
            .finish()
    }
}

/// All environment-provided values, validated for presence.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub corax_nodes: String,
    pub cluster: ClusterValues,
    pub sizing: BrokerSizing,
    pub credentials: Credentials,
    /// Fallback only; the key file takes precedence.
    pub user_public_key: String,
}

impl Inputs {
    /// Read every input. Required variables are checked in a fixed order and
    /// the first one missing is reported.
    pub fn load(env: &dyn EnvLookup) -> Result<Self> {
        let corax_nodes = read_required_var(env, CORAX_NODES)?;

        let cluster = ClusterValues {
            cloudru_project_id: read_required_var(env, CLOUDRU_PROJECT_ID)?,
            gis_project_name: read_required_var(env, GIS_PROJECT_NAME)?,
            cluster_number: read_required_var(env, CLUSTER_NUMBER)?,
            cluster_subnet: read_required_var(env, CLUSTER_SUBNET)?,
            cluster_gateway: read_required_var(env, CLUSTER_GATEWAY)?,
            users_subnet: read_required_var(env, USERS_SUBNET)?,
            infra_subnet_gitlab: read_required_var(env, INFRA_SUBNET_GITLAB)?,
            infra_subnet_jumphost: read_required_var(env, INFRA_SUBNET_JUMPHOST)?,
        };

        let sizing = BrokerSizing {
            cpu: read_optional_var(env, KAFKA_BROKER_CPU, "2"),
            ram: read_optional_var(env, KAFKA_BROKER_RAM, "4"),
            oversubscription: read_optional_var(env, KAFKA_BROKER_OVERSUBSCRIPTION, "1:10"),
            boot_disk_size: read_optional_var(env, KAFKA_BROKER_BOOT_DISK_SIZE, "40"),
            disk_size: read_optional_var(env, KAFKA_BROKER_DISK_SIZE, "10"),
        };

        let credentials = Credentials {
            cloudru_key_id: read_required_var(env, CLOUDRU_KEY_ID)?,
            cloudru_secret: read_required_var(env, CLOUDRU_SECRET)?,
            user_name: read_required_var(env, USER_NAME)?,
            user_pass: read_required_var(env, USER_PASS)?,
        };

        Ok(Self {
            corax_nodes,
            cluster,
            sizing,
            credentials,
            user_public_key: read_optional_var(env, USER_PUBLIC_KEY, ""),
        })
    }
}
