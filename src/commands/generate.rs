use anyhow::Result;
use std::path::Path;

use corax_tfvars::env::EnvLookup;
use corax_tfvars::generator::{self, Settings};

use super::utils::{log_info, log_success, warn_fallback};

pub fn run(env: &dyn EnvLookup, settings: &Settings, output: &Path, dry_run: bool) -> Result<()> {
    log_info("Generating terraform.tfvars...");

    let generated = generator::generate(env, settings)?;
    if generated.brokers.fell_back {
        warn_fallback(&settings.broker_role);
    }

    let content = generated.document.to_string();
    if dry_run {
        log_info(&format!("[DRY RUN] Would write {}", output.display()));
    } else {
        generator::write_document(&generated.document, output)?;
        log_success(&format!("Successfully generated {}", output.display()));
    }

    println!();
    print!("{}", content);
    Ok(())
}
