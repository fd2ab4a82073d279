//! Asset inventory listing.

use std::collections::HashMap;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use itam_core::error::AppError;
use itam_core::types::{AssetTypeId, CategoryId, StatusId, SubcategoryId, TableFilter};
use itam_service::AssetStore;
use itam_service::cascade::{CatalogPath, apply_table_filter, filter_assets};

/// Arguments for the assets command
#[derive(Debug, Args)]
pub struct AssetArgs {
    /// Category
    #[arg(long)]
    pub category: Option<i64>,
    /// Subcategory
    #[arg(long)]
    pub subcategory: Option<i64>,
    /// Asset type
    #[arg(long = "type")]
    pub asset_type: Option<i64>,
    /// Case-insensitive search over name, serial, brand and model
    #[arg(short, long)]
    pub search: Option<String>,
    /// Lifecycle status id
    #[arg(long)]
    pub status: Option<i64>,
}

/// Asset display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    /// Asset ID
    id: i64,
    /// Name
    name: String,
    /// Serial number
    serial: String,
    /// Brand
    brand: String,
    /// Status
    status: String,
    /// Purchase date
    purchased: String,
}

/// Execute the assets command
pub async fn execute(
    args: &AssetArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let conn = super::connect(config_path).await?;
    let reference = conn.reference_store();
    let store = AssetStore::new(
        conn.transport.clone(),
        conn.config.import.clone(),
        conn.session.child_token(),
    );

    let (loaded, assets) = tokio::join!(reference.load(), store.list());
    loaded?;
    let assets = assets?;

    let statuses: HashMap<StatusId, String> = reference
        .read()
        .await
        .statuses
        .iter()
        .map(|s| (s.id, s.name.clone()))
        .collect();

    let path = CatalogPath {
        category: args.category.map(CategoryId::new),
        subcategory: args.subcategory.map(SubcategoryId::new),
        asset_type: args.asset_type.map(AssetTypeId::new),
        asset: None,
    };
    let status = args.status.map(StatusId::new);

    let scoped: Vec<_> = filter_assets(&assets, &path)
        .into_iter()
        .filter(|a| status.is_none() || a.status_id == status)
        .collect();
    let filter = TableFilter {
        global: args.search.clone(),
        ..TableFilter::default()
    };

    let rows: Vec<AssetRow> = apply_table_filter(&scoped, &filter)
        .into_iter()
        .map(|a| AssetRow {
            id: a.id.get(),
            name: a.asset_name.clone(),
            serial: a.serial_number.clone(),
            brand: output::cell(&a.brand),
            status: a
                .status_id
                .and_then(|id| statuses.get(&id).cloned())
                .unwrap_or_default(),
            purchased: output::date_cell(a.purchase_date),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
