//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use itam_client::HttpTransport;
use itam_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file and API address
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path).await?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("API root", &config.api.root_url());
                    output::print_kv("Timeout (s)", &config.api.timeout_seconds.to_string());
                    output::print_kv(
                        "Connect timeout (s)",
                        &config.api.connect_timeout_seconds.to_string(),
                    );
                    output::print_kv("Log level", &config.logging.level);
                    output::print_kv("Log format", &config.logging.format.to_string());
                    output::print_kv(
                        "Date formats",
                        &config.import.accepted_date_formats.join(", "),
                    );
                    output::print_kv(
                        "Serial dates",
                        &config.import.excel_serial_dates.to_string(),
                    );
                }
            }
        }
        ConfigCommand::Validate => {
            let checked = super::load_config(config_path)
                .await
                .and_then(|config| HttpTransport::new(&config.api).map(|_| config));
            match checked {
                Ok(config) => {
                    output::print_success(&format!("Configuration '{}' is valid", config_path));
                    println!("  API: {}", config.api.root_url());
                }
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {}", e));
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
