//! Core type definitions used across the ITAM workspace.

pub mod filter;
pub mod id;

pub use filter::{ColumnFilter, DateRange, FilterOp, TableFilter};
pub use id::*;
