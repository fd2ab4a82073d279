//! ITAM Dashboard: headless session boot.
//!
//! Loads configuration, opens the API transport, and boots one dashboard
//! session: every lookup list, transaction collection and dashboard
//! aggregate is fetched concurrently, then summarized in the log. Ctrl+C
//! or SIGTERM cancels whatever is still in flight.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use itam_client::HttpTransport;
use itam_core::config::AppConfig;
use itam_core::config::logging::LogFormat;
use itam_core::error::AppError;
use itam_core::traits::ApiTransport;
use itam_service::{
    AssetStore, BorrowStore, DashboardService, IssuanceStore, ReferenceDataStore, RepairStore,
    SessionContext,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Dashboard error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("ITAM_CONFIG") {
        Ok(path) => AppConfig::load(&path),
        Err(_) => {
            let env = std::env::var("ITAM_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load_env(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Boot one session and log what loaded
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ITAM dashboard v{}", env!("CARGO_PKG_VERSION"));

    let transport: Arc<dyn ApiTransport> = Arc::new(HttpTransport::new(&config.api)?);
    tracing::info!(api = %config.api.root_url(), "API transport ready");

    let session = SessionContext::new(std::env::var("USER").ok());
    tracing::info!(session = %session.session_id, operator = ?session.operator, "Session started");

    let reference = ReferenceDataStore::new(Arc::clone(&transport), session.child_token());
    let assets = AssetStore::new(
        Arc::clone(&transport),
        config.import.clone(),
        session.child_token(),
    );
    let borrows = BorrowStore::new(Arc::clone(&transport), session.child_token());
    let repairs = RepairStore::new(Arc::clone(&transport), session.child_token());
    let issuances = IssuanceStore::new(Arc::clone(&transport), session.child_token());
    let dashboard = DashboardService::new(Arc::clone(&transport), session.child_token());

    let boot = async {
        tokio::join!(
            reference.load(),
            assets.refresh(),
            borrows.refresh(),
            repairs.refresh(),
            issuances.refresh(),
            dashboard.snapshot(),
        )
    };

    let (loaded, assets_ok, borrows_ok, repairs_ok, issuances_ok, snapshot) = tokio::select! {
        results = boot => results,
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, cancelling in-flight requests...");
            session.shutdown();
            return Ok(());
        }
    };

    match loaded {
        Ok(report) => {
            for (lookup, rows) in reference.read().await.counts() {
                tracing::info!(lookup = %lookup, rows, "Lookup");
            }
            if !report.is_complete() {
                tracing::warn!(failed = ?report.failed, "Some lookups did not load");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Reference data not loaded"),
    }

    tracing::info!(
        assets = assets.records().await.len(),
        borrows = borrows.records().await.len(),
        repairs = repairs.records().await.len(),
        issuances = issuances.records().await.len(),
        complete = assets_ok && borrows_ok && repairs_ok && issuances_ok,
        "Collections loaded"
    );

    match snapshot {
        Ok(snapshot) => {
            if let Some(stats) = &snapshot.stats {
                tracing::info!(
                    total = stats.total_assets,
                    available = stats.available_assets,
                    borrowed = stats.borrowed_assets,
                    issued = stats.issued_assets,
                    under_repair = stats.under_repair,
                    "Dashboard stats"
                );
            }
            if !snapshot.is_complete() {
                tracing::warn!(failed = ?snapshot.failed, "Some dashboard parts did not load");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Dashboard not loaded"),
    }

    session.shutdown();
    tracing::info!("ITAM dashboard session closed");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
