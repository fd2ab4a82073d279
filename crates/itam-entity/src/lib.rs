//! # itam-entity
//!
//! Domain entity models for the ITAM dashboard. Every struct in this
//! crate is either a record served by the remote API or a form payload
//! posted back to it. Records derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`; forms additionally derive `validator::Validate` so that
//! bad input is stopped before it reaches the network.

pub mod asset;
pub mod catalog;
pub mod dashboard;
pub mod insurance;
pub mod org;
pub mod serde_helpers;
pub mod transaction;
pub mod validation;

pub use validation::validate_form;
