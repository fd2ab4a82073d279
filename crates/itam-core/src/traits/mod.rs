//! Core traits defined in `itam-core` and implemented by other crates.

pub mod hierarchy;
pub mod resource;
pub mod service;
pub mod transport;

pub use hierarchy::{CatalogScoped, ChildOf, Keyed, Labeled, OrgScoped};
pub use resource::RemoteResource;
pub use service::Service;
pub use transport::ApiTransport;
