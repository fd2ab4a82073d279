//! # itam-service
//!
//! Client-side logic for the ITAM dashboard: the cascading filter engine
//! over the organization and catalog hierarchies, selection state with
//! parent reset, table filtering, and the stores that load and mutate
//! data through an [`itam_core::traits::ApiTransport`].
//!
//! Stores follow constructor injection: the transport and the
//! cancellation token are handed in at construction time.

pub mod asset;
pub mod cascade;
pub mod context;
pub mod dashboard;
pub mod insurance;
pub mod reference;
pub mod transaction;

mod reply;

pub use asset::AssetStore;
pub use cascade::{
    CatalogPath, CatalogSelection, FormSelection, LevelMatch, OrgPath, OrgSelection, SelectionEvent,
    TableRow,
};
pub use context::SessionContext;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use insurance::InsuranceService;
pub use reference::{ReferenceData, ReferenceDataStore};
pub use transaction::{BorrowStore, IssuanceStore, RepairStore, TransactionStore};
