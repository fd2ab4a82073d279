//! # itam-client
//!
//! Transports implementing [`itam_core::traits::ApiTransport`]:
//!
//! - [`HttpTransport`]: reqwest client against the remote PHP API.
//! - [`MemoryTransport`]: in-memory server double with a call log, used
//!   by tests and offline runs.

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::{MemoryTransport, RecordedCall};
