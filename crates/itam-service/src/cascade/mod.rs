//! Cascading filter engine and the selection state that drives it.
//!
//! The engine is pure: option lists and filtered records are computed
//! from reference slices and a selection path. Resets on parent change
//! belong to [`selection`].

pub mod catalog;
pub mod engine;
pub mod org;
pub mod selection;
pub mod table;

pub use catalog::{CatalogPath, filter_assets, subcategory_options, type_options};
pub use engine::{LevelMatch, child_options, distinct_by_key, filter_transactions};
pub use org::{
    OrgPath, department_options, departments_from_users, filter_users, unit_options,
    units_from_users,
};
pub use selection::{CatalogSelection, FormSelection, OrgSelection, SelectionEvent};
pub use table::{TableRow, apply_table_filter, row_matches};
