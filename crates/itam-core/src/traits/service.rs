//! Service marker trait.

/// Marker trait for stores and read services.
///
/// Every service in `itam-service` implements this trait so that a
/// session can hold them uniformly behind `Arc`.
pub trait Service: Send + Sync + 'static {}
