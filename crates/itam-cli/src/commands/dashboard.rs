//! Dashboard summary command.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;
use itam_entity::dashboard::CompanyCount;
use itam_service::DashboardService;

/// Per-company display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CompanyRow {
    company: String,
    borrowed: u64,
    issued: u64,
}

/// Merge the borrowed and issued per-company counts into one table.
fn company_rows(borrowed: &[CompanyCount], issued: &[CompanyCount]) -> Vec<CompanyRow> {
    let mut rows: Vec<CompanyRow> = borrowed
        .iter()
        .map(|c| CompanyRow {
            company: c.company_name.clone(),
            borrowed: c.count,
            issued: 0,
        })
        .collect();

    for c in issued {
        match rows.iter_mut().find(|r| r.company == c.company_name) {
            Some(row) => row.issued = c.count,
            None => rows.push(CompanyRow {
                company: c.company_name.clone(),
                borrowed: 0,
                issued: c.count,
            }),
        }
    }
    rows
}

/// Execute the dashboard command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let conn = super::connect(config_path).await?;
    let service = DashboardService::new(conn.transport.clone(), conn.session.child_token());
    let snapshot = service.snapshot().await?;

    if format == OutputFormat::Json {
        output::print_json(&snapshot);
        return Ok(());
    }

    if let Some(stats) = &snapshot.stats {
        println!("Assets");
        output::print_kv("Total", &stats.total_assets.to_string());
        output::print_kv("Available", &stats.available_assets.to_string());
        output::print_kv("Borrowed", &stats.borrowed_assets.to_string());
        output::print_kv("Issued", &stats.issued_assets.to_string());
        output::print_kv("Under repair", &stats.under_repair.to_string());
        output::print_kv("Pending repairs", &stats.pending_repairs.to_string());
        println!();
    }

    let borrowed = snapshot.borrowed_by_company.as_deref().unwrap_or_default();
    let issued = snapshot.issued_by_company.as_deref().unwrap_or_default();
    output::print_list(&company_rows(borrowed, issued), format);

    if let Some(overdue) = &snapshot.overdue_borrowed {
        println!();
        output::print_kv("Overdue borrows", &overdue.len().to_string());
    }
    if let Some(urgent) = &snapshot.urgent_repairs {
        output::print_kv("Urgent repairs", &urgent.len().to_string());
    }

    for action in &snapshot.failed {
        output::print_warning(&format!("'{}' could not be loaded", action));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(name: &str, count: u64) -> CompanyCount {
        CompanyCount {
            company_name: name.to_string(),
            count,
        }
    }

    #[test]
    fn test_company_rows_merge_both_lists() {
        let rows = company_rows(
            &[count("Acme", 3), count("Globex", 1)],
            &[count("Globex", 5), count("Initech", 2)],
        );
        let flat: Vec<(&str, u64, u64)> = rows
            .iter()
            .map(|r| (r.company.as_str(), r.borrowed, r.issued))
            .collect();
        assert_eq!(
            flat,
            vec![("Acme", 3, 0), ("Globex", 1, 5), ("Initech", 0, 2)]
        );
    }
}
