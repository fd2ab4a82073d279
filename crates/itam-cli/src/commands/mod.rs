//! CLI command definitions and dispatch.

pub mod asset;
pub mod config;
pub mod dashboard;
pub mod import;
pub mod insurance;
pub mod options;
pub mod reference;
pub mod transaction;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::output::OutputFormat;
use itam_client::HttpTransport;
use itam_core::config::AppConfig;
use itam_core::error::AppError;
use itam_core::traits::ApiTransport;
use itam_service::{ReferenceDataStore, SessionContext};

/// ITAM: IT asset management dashboard tools
#[derive(Debug, Parser)]
#[command(name = "itam", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Row counts of every reference lookup
    Reference,
    /// Dropdown options for one hierarchy level
    Options(options::OptionsArgs),
    /// Asset inventory
    Assets(asset::AssetArgs),
    /// Borrow transactions
    Borrows(transaction::TransactionArgs),
    /// Repair requests
    Repairs(transaction::TransactionArgs),
    /// Issuance records
    Issuances(transaction::TransactionArgs),
    /// Bulk asset import from a CSV export
    Import(import::ImportArgs),
    /// Dashboard summary
    Dashboard,
    /// Insurance policies
    Insurance(insurance::InsuranceArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Reference => reference::execute(&self.config, self.format).await,
            Commands::Options(args) => options::execute(args, &self.config, self.format).await,
            Commands::Assets(args) => asset::execute(args, &self.config, self.format).await,
            Commands::Borrows(args) => {
                transaction::execute_borrows(args, &self.config, self.format).await
            }
            Commands::Repairs(args) => {
                transaction::execute_repairs(args, &self.config, self.format).await
            }
            Commands::Issuances(args) => {
                transaction::execute_issuances(args, &self.config, self.format).await
            }
            Commands::Import(args) => import::execute(args, &self.config).await,
            Commands::Dashboard => dashboard::execute(&self.config, self.format).await,
            Commands::Insurance(args) => insurance::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// A configured transport plus the session that owns its requests.
pub struct Connection {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Session whose token every store is a child of.
    pub session: SessionContext,
    /// HTTP transport to the remote API.
    pub transport: Arc<dyn ApiTransport>,
}

impl Connection {
    /// Reference data store bound to this session.
    pub fn reference_store(&self) -> ReferenceDataStore {
        ReferenceDataStore::new(Arc::clone(&self.transport), self.session.child_token())
    }

    /// Load every lookup, warning about lists that failed.
    pub async fn load_reference(&self) -> Result<ReferenceDataStore, AppError> {
        let store = self.reference_store();
        let report = store.load().await?;
        for lookup in &report.failed {
            warn!(lookup = %lookup, "Reference list unavailable");
        }
        Ok(store)
    }
}

/// Helper: load configuration and open an HTTP transport
pub async fn connect(config_path: &str) -> Result<Connection, AppError> {
    let config = load_config(config_path).await?;
    let transport = HttpTransport::new(&config.api)?;
    let session = SessionContext::new(std::env::var("USER").ok());

    let conn = Connection {
        config,
        session,
        transport: Arc::new(transport),
    };

    let token = conn.session.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    Ok(conn)
}
