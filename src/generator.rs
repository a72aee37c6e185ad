//! Turns environment inputs into a rendered terraform.tfvars document.
//!
//! Everything runs in memory: inputs are validated, brokers derived and the
//! public key resolved before anything touches the output path.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::brokers::{derive_broker_ips, BrokerSelection};
use crate::config::GeneratorConfig;
use crate::env::{self, EnvLookup, Inputs};
use crate::error::{Result, TfvarsError};
use crate::nodes::parse_nodes;
use crate::public_key::{default_key_path, resolve_public_key};
use crate::tfvars::{TfvarsDocument, TfvarsValue};

/// Knobs that shape a run, merged from config file and CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub broker_role: String,
    pub public_key_path: Option<PathBuf>,
    pub fallback_to_all_nodes: bool,
}

impl Settings {
    /// Use the config file values, falling back to `$HOME` for the key path.
    pub fn from_config(config: &GeneratorConfig, env: &dyn EnvLookup) -> Self {
        Self {
            broker_role: config.broker_role.clone(),
            public_key_path: config
                .public_key_path
                .clone()
                .or_else(|| default_key_path(env)),
            fallback_to_all_nodes: config.fallback_to_all_nodes,
        }
    }
}

/// Result of a successful run, ready to be written.
#[derive(Debug)]
pub struct Generated {
    pub document: TfvarsDocument,
    pub brokers: BrokerSelection,
}

/// Parse CORAX_NODES and pick the broker hosts.
pub fn select_brokers(corax_nodes: &str, settings: &Settings) -> Result<BrokerSelection> {
    let nodes = parse_nodes(corax_nodes)?;
    debug!(nodes = nodes.len(), "parsed CORAX_NODES");

    let brokers = derive_broker_ips(&nodes, &settings.broker_role);
    if brokers.fell_back && !settings.fallback_to_all_nodes {
        return Err(TfvarsError::NoBrokers {
            role: settings.broker_role.clone(),
        });
    }
    Ok(brokers)
}

pub fn generate(env: &dyn EnvLookup, settings: &Settings) -> Result<Generated> {
    let inputs = Inputs::load(env)?;
    let brokers = select_brokers(&inputs.corax_nodes, settings)?;
    let public_key =
        resolve_public_key(settings.public_key_path.as_deref(), &inputs.user_public_key)?;
    let document = render(&inputs, &brokers, &public_key)?;

    info!(brokers = brokers.count(), fell_back = brokers.fell_back, "rendered tfvars");
    Ok(Generated { document, brokers })
}

/// Lay out every variable in its fixed position.
pub fn render(
    inputs: &Inputs,
    brokers: &BrokerSelection,
    public_key: &str,
) -> Result<TfvarsDocument> {
    let sizing = &inputs.sizing;
    let cluster = &inputs.cluster;
    let creds = &inputs.credentials;
    let s = |v: &str| TfvarsValue::String(v.to_string());

    Ok(TfvarsDocument::new()
        .group()
        .push(
            "kafka_broker_count",
            TfvarsValue::Number(brokers.count().to_string()),
        )
        .push("kafka_broker_ips", TfvarsValue::List(brokers.ips.clone()))
        .group()
        .push(
            "kafka_broker_cpu",
            TfvarsValue::number(env::KAFKA_BROKER_CPU, &sizing.cpu)?,
        )
        .push(
            "kafka_broker_ram",
            TfvarsValue::number(env::KAFKA_BROKER_RAM, &sizing.ram)?,
        )
        .push("kafka_broker_oversubscription", s(&sizing.oversubscription))
        .push(
            "kafka_broker_boot_disk_size",
            TfvarsValue::number(env::KAFKA_BROKER_BOOT_DISK_SIZE, &sizing.boot_disk_size)?,
        )
        .push(
            "kafka_broker_disk_size",
            TfvarsValue::number(env::KAFKA_BROKER_DISK_SIZE, &sizing.disk_size)?,
        )
        .group()
        .push(env::CLOUDRU_PROJECT_ID, s(&cluster.cloudru_project_id))
        .push(env::GIS_PROJECT_NAME, s(&cluster.gis_project_name))
        .push(env::CLUSTER_NUMBER, s(&cluster.cluster_number))
        .push(env::CLUSTER_SUBNET, s(&cluster.cluster_subnet))
        .push(env::CLUSTER_GATEWAY, s(&cluster.cluster_gateway))
        .push(env::USERS_SUBNET, s(&cluster.users_subnet))
        .push(env::INFRA_SUBNET_GITLAB, s(&cluster.infra_subnet_gitlab))
        .push(env::INFRA_SUBNET_JUMPHOST, s(&cluster.infra_subnet_jumphost))
        .group()
        .push(env::CLOUDRU_KEY_ID, s(&creds.cloudru_key_id))
        .push(env::CLOUDRU_SECRET, s(&creds.cloudru_secret))
        .push(env::USER_NAME, s(&creds.user_name))
        .push(env::USER_PASS, s(&creds.user_pass))
        .push(env::USER_PUBLIC_KEY, s(public_key)))
}

/// Create the parent directory if needed and write the whole document.
pub fn write_document(document: &TfvarsDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TfvarsError::io(parent, e))?;
    }
    std::fs::write(path, document.to_string()).map_err(|e| TfvarsError::io(path, e))?;
    debug!(path = %path.display(), "wrote tfvars");
    Ok(())
}
