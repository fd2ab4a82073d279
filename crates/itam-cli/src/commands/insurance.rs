//! Insurance policy listing.

use chrono::Local;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;
use itam_service::InsuranceService;

/// Arguments for the insurance command
#[derive(Debug, Args)]
pub struct InsuranceArgs {
    /// Only policies ending within this many days
    #[arg(long)]
    pub expiring: Option<i64>,
}

/// Policy display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PolicyRow {
    id: i64,
    policy: String,
    provider: String,
    starts: String,
    ends: String,
    days_left: String,
}

/// Execute the insurance command
pub async fn execute(
    args: &InsuranceArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let conn = super::connect(config_path).await?;
    let service = InsuranceService::new(conn.transport.clone(), conn.session.child_token());
    let today = Local::now().date_naive();

    let policies = match args.expiring {
        Some(days) => service.expiring_within(today, days).await?,
        None => service.list().await?,
    };

    let rows: Vec<PolicyRow> = policies
        .iter()
        .map(|p| PolicyRow {
            id: p.id.get(),
            policy: p.policy_number.clone(),
            provider: output::cell(&p.provider),
            starts: output::date_cell(p.start_date),
            ends: output::date_cell(p.end_date),
            days_left: p
                .days_remaining(today)
                .map(|d| d.to_string())
                .unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
