//! Cascading dropdown option listing.

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;
use itam_core::traits::{Keyed, Labeled};
use itam_core::types::{CategoryId, CompanyId, DepartmentId, SubcategoryId};
use itam_service::cascade::{departments_from_users, units_from_users};

/// Hierarchy level whose options are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    /// Departments of a company
    Department,
    /// Units of a company and department
    Unit,
    /// Subcategories of a category
    Subcategory,
    /// Types mapped under a subcategory
    Type,
}

/// Arguments for the options command
#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Level to list
    #[arg(value_enum)]
    pub level: Level,
    /// Selected company
    #[arg(long)]
    pub company: Option<i64>,
    /// Selected department
    #[arg(long)]
    pub department: Option<i64>,
    /// Selected category
    #[arg(long)]
    pub category: Option<i64>,
    /// Selected subcategory
    #[arg(long)]
    pub subcategory: Option<i64>,
    /// Derive department/unit options from the employee list
    #[arg(long)]
    pub from_users: bool,
}

/// Option display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OptionRow {
    /// Option value
    id: i64,
    /// Option label
    name: String,
}

impl OptionRow {
    fn of<T>(item: &T) -> Self
    where
        T: Keyed + Labeled,
        T::Key: Into<i64>,
    {
        Self {
            id: item.key().into(),
            name: item.label().to_string(),
        }
    }
}

/// Execute the options command
pub async fn execute(
    args: &OptionsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let conn = super::connect(config_path).await?;
    let store = conn.load_reference().await?;
    let data = store.read().await;

    let company = args.company.map(CompanyId::new);
    let department = args.department.map(DepartmentId::new);

    let rows: Vec<OptionRow> = match (args.level, args.from_users) {
        (Level::Department, false) => data
            .department_options(company)
            .into_iter()
            .map(OptionRow::of)
            .collect(),
        (Level::Department, true) => departments_from_users(&data.users, company)
            .iter()
            .map(OptionRow::of)
            .collect(),
        (Level::Unit, false) => data
            .unit_options(company, department)
            .into_iter()
            .map(OptionRow::of)
            .collect(),
        (Level::Unit, true) => units_from_users(&data.users, company, department)
            .iter()
            .map(OptionRow::of)
            .collect(),
        (Level::Subcategory, _) => data
            .subcategory_options(args.category.map(CategoryId::new))
            .into_iter()
            .map(OptionRow::of)
            .collect(),
        (Level::Type, _) => data
            .type_options(args.subcategory.map(SubcategoryId::new))
            .into_iter()
            .map(OptionRow::of)
            .collect(),
    };

    output::print_list(&rows, format);
    Ok(())
}
