//! # itam-core
//!
//! Core crate for the ITAM dashboard. Contains configuration schemas,
//! typed identifiers, endpoint and request-body types, table filter
//! values, the hierarchy and transport traits, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other ITAM crates.

pub mod config;
pub mod error;
pub mod request;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
