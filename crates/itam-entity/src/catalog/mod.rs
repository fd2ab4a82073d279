//! Asset classification hierarchy: category → subcategory → type, plus
//! the flat condition/status/urgency lookups.

pub mod asset_type;
pub mod category;
pub mod lookup;
pub mod subcategory;

pub use asset_type::{AssetType, MappedType, NewMappedType};
pub use category::{Category, NewCategory};
pub use lookup::{Condition, Status, Urgency};
pub use subcategory::{NewSubcategory, Subcategory};
