//! Reference (lookup) data loaded once per session.

pub mod store;

pub use store::{LoadReport, Lookup, ReferenceData, ReferenceDataStore};
