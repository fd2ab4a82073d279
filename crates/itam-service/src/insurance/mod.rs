//! Insurance policy listing.

pub mod service;

pub use service::InsuranceService;
