//! Read-only dashboard aggregates.

pub mod service;

pub use service::{DashboardService, DashboardSnapshot};
