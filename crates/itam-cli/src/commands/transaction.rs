//! Borrow, repair and issuance listings.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;
use itam_core::traits::{CatalogScoped, OrgScoped, RemoteResource};
use itam_core::types::{CategoryId, CompanyId, DateRange, DepartmentId, TableFilter, UnitId};
use itam_entity::transaction::{BorrowRecord, IssuanceRecord, RepairRequest};
use itam_service::TransactionStore;
use itam_service::cascade::{
    CatalogPath, OrgPath, TableRow, apply_table_filter, filter_transactions,
};

/// Filters shared by every transaction listing
#[derive(Debug, Args)]
pub struct TransactionArgs {
    /// Company
    #[arg(long)]
    pub company: Option<i64>,
    /// Department
    #[arg(long)]
    pub department: Option<i64>,
    /// Unit
    #[arg(long)]
    pub unit: Option<i64>,
    /// Category
    #[arg(long)]
    pub category: Option<i64>,
    /// Case-insensitive search over names and remarks
    #[arg(short, long)]
    pub search: Option<String>,
    /// First day of the date window (yyyy-MM-dd)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day of the date window (yyyy-MM-dd)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Status tab, e.g. "Borrowed" or "Returned"
    #[arg(long)]
    pub tab: Option<String>,
}

impl TransactionArgs {
    fn org_path(&self) -> OrgPath {
        OrgPath {
            company: self.company.map(CompanyId::new),
            department: self.department.map(DepartmentId::new),
            unit: self.unit.map(UnitId::new),
            user: None,
        }
    }

    fn catalog_path(&self) -> CatalogPath {
        CatalogPath {
            category: self.category.map(CategoryId::new),
            ..CatalogPath::default()
        }
    }

    fn table_filter(&self) -> TableFilter {
        TableFilter {
            global: self.search.clone(),
            columns: Vec::new(),
            date_range: (self.from.is_some() || self.to.is_some())
                .then(|| DateRange::new(self.from, self.to)),
            tab: self.tab.clone(),
        }
    }
}

/// Borrow display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BorrowRow {
    id: i64,
    asset: String,
    borrower: String,
    borrowed: String,
    due: String,
    returned: String,
    status: String,
}

/// Repair display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RepairRow {
    id: i64,
    asset: String,
    issue: String,
    requested: String,
    completed: String,
    status: String,
}

/// Issuance display row for table output
#[derive(Debug, Serialize, Tabled)]
struct IssuanceRow {
    id: i64,
    asset: String,
    issued_to: String,
    issued: String,
    pulled_out: String,
    status: String,
}

/// Fetch one transaction collection, narrow it and print it.
async fn list_filtered<R, Row, F>(
    args: &TransactionArgs,
    config_path: &str,
    format: OutputFormat,
    to_row: F,
) -> Result<(), AppError>
where
    R: RemoteResource + OrgScoped + CatalogScoped + TableRow,
    Row: Serialize + Tabled,
    F: Fn(&R) -> Row,
{
    let conn = super::connect(config_path).await?;
    let store = TransactionStore::<R>::new(conn.transport.clone(), conn.session.child_token());
    let records = store.list().await?;

    let scoped = filter_transactions(&records, &args.org_path(), &args.catalog_path());
    let rows: Vec<Row> = apply_table_filter(&scoped, &args.table_filter())
        .into_iter()
        .map(to_row)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Execute the borrows command
pub async fn execute_borrows(
    args: &TransactionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    list_filtered(args, config_path, format, |b: &BorrowRecord| BorrowRow {
        id: b.id.get(),
        asset: output::cell(&b.asset_name),
        borrower: output::cell(&b.borrower_name),
        borrowed: output::date_cell(b.borrow_date),
        due: output::date_cell(b.due_date),
        returned: output::date_cell(b.return_date),
        status: b.status.clone(),
    })
    .await
}

/// Execute the repairs command
pub async fn execute_repairs(
    args: &TransactionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    list_filtered(args, config_path, format, |r: &RepairRequest| RepairRow {
        id: r.id.get(),
        asset: output::cell(&r.asset_name),
        issue: r.issue_description.clone(),
        requested: output::date_cell(r.request_date),
        completed: output::date_cell(r.completed_date),
        status: r.status.clone(),
    })
    .await
}

/// Execute the issuances command
pub async fn execute_issuances(
    args: &TransactionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    list_filtered(args, config_path, format, |i: &IssuanceRecord| IssuanceRow {
        id: i.id.get(),
        asset: output::cell(&i.asset_name),
        issued_to: output::cell(&i.issued_to_name),
        issued: output::date_cell(i.issued_date),
        pulled_out: output::date_cell(i.pullout_date),
        status: i.status.clone(),
    })
    .await
}
