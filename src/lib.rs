//! Generate `terraform.tfvars` for a Corax Kafka cluster from CI environment.
//!
//! Cluster topology arrives as a JSON node list in `CORAX_NODES`; broker
//! addresses are derived from it and written, together with project, network
//! and credential values, as Terraform variable assignments.

pub mod brokers;
pub mod config;
pub mod env;
pub mod error;
pub mod generator;
pub mod nodes;
pub mod public_key;
pub mod tfvars;

pub use config::GeneratorConfig;
pub use error::{Result, TfvarsError};
