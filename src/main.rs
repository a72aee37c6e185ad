use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use corax_tfvars::config::{GeneratorConfig, DEFAULT_CONFIG_FILE};
use corax_tfvars::env::ProcessEnv;
use corax_tfvars::generator::Settings;

mod commands;

use commands::utils::log_error;

#[derive(Parser)]
#[command(name = "corax-tfvars")]
#[command(about = "Generate terraform.tfvars for Corax Kafka clusters from CI environment", long_about = None)]
#[command(version)]
struct Cli {
    /// Optional YAML file with generator overrides
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write terraform.tfvars (default when no subcommand is given)
    Generate {
        /// Output file (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Public key file to prefer over USER_PUBLIC_KEY
        #[arg(long)]
        public_key: Option<PathBuf>,

        /// Print the document without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the broker IPs derived from CORAX_NODES
    Brokers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(cli: &Cli) {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let env = ProcessEnv;
    let config = GeneratorConfig::load(&cli.config)?;
    let mut settings = Settings::from_config(&config, &env);

    match cli.command {
        None => {
            commands::generate::run(&env, &settings, &config.output, false)?;
        }

        Some(Commands::Generate {
            output,
            public_key,
            dry_run,
        }) => {
            if public_key.is_some() {
                settings.public_key_path = public_key;
            }
            let output = output.unwrap_or(config.output);
            commands::generate::run(&env, &settings, &output, dry_run)?;
        }

        Some(Commands::Brokers { json }) => {
            commands::brokers::run(&env, &settings, json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        log_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
