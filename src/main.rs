//! Operator CLI for the backend connector.
//!
//! ```text
//! connector [--config FILE] check [--strict]   validate configuration
//! connector [--config FILE] connect            build the shared handle
//! connector [--config FILE] health             build the handle and probe the backend
//! ```

use std::io::Write;
use std::path::PathBuf;

use backend_connector::config::{load_config, validate_config, ConnectorConfig};
use backend_connector::connector;
use backend_connector::observability::logging::init_logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "connector")]
#[command(about = "Inspect and exercise the backend connector", long_about = None)]
struct Cli {
    /// TOML configuration file; environment values still take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration and print any issues
    Check {
        /// Fail when the configuration is invalid
        #[arg(long)]
        strict: bool,
    },
    /// Build the shared backend handle
    Connect,
    /// Build the handle and probe backend health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ConnectorConfig::from_env(),
    };
    init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Check { strict } => {
            check(&config, strict, &mut std::io::stdout().lock())?;
        }
        Commands::Connect => {
            let handle = connector::install_global(config)?.get_handle().await?;
            println!("instance: {}", handle.instance_id());
            println!("endpoint: {}", handle.base_url());
        }
        Commands::Health => {
            let handle = connector::install_global(config)?.get_handle().await?;
            if handle.is_healthy().await {
                println!("healthy: {}", handle.auth_url("health"));
            } else {
                return Err(format!("backend at {} is unhealthy", handle.base_url()).into());
            }
        }
    }

    Ok(())
}

/// Print validation results; under `strict` an invalid configuration is an error.
fn check(
    config: &ConnectorConfig,
    strict: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let validation = validate_config(config);
    writeln!(out, "url: {}", config.service.url)?;
    if validation.valid {
        writeln!(out, "configuration ok")?;
        return Ok(());
    }
    for issue in &validation.issues {
        writeln!(out, "issue: {}", issue)?;
    }
    if strict {
        validation.into_result()?;
    }
    Ok(())
}
