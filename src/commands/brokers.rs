use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use corax_tfvars::env::{read_required_var, EnvLookup, CORAX_NODES};
use corax_tfvars::generator::{select_brokers, Settings};

use super::utils::warn_fallback;

pub fn run(env: &dyn EnvLookup, settings: &Settings, json: bool) -> Result<()> {
    let nodes = read_required_var(env, CORAX_NODES)?;
    let brokers = select_brokers(&nodes, settings)?;

    if json {
        if brokers.fell_back {
            // stdout is reserved for the JSON payload
            warn!(role = %settings.broker_role, "no nodes carry the broker role, using all nodes");
        }
        println!("{}", serde_json::to_string_pretty(&brokers.ips)?);
        return Ok(());
    }

    if brokers.fell_back {
        warn_fallback(&settings.broker_role);
    }

    println!("{:<4} {}", "#".bold(), "BROKER".bold());
    println!("{}", "-".repeat(40));
    for (i, ip) in brokers.ips.iter().enumerate() {
        println!("{:<4} {}", i, ip);
    }
    println!("\n{} broker(s)", brokers.count());

    Ok(())
}
