//! Binding between an entity type and its REST endpoint.

use std::fmt::Display;

use serde::de::DeserializeOwned;

use crate::request::Endpoint;

/// A record type served by a `<script>.php?resource=<name>` endpoint.
pub trait RemoteResource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// The record's identifier type.
    type Id: Copy + Eq + Display + Send + Sync + 'static;

    /// Script name without `.php`.
    const SCRIPT: &'static str;
    /// `resource=` value.
    const RESOURCE: &'static str;
    /// Human-readable label used in logs and errors.
    const LABEL: &'static str;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// The list/insert endpoint.
    fn endpoint() -> Endpoint {
        Endpoint::resource(Self::SCRIPT, Self::RESOURCE)
    }

    /// The update endpoint for one record.
    fn update_endpoint(id: Self::Id) -> Endpoint {
        Self::endpoint().with_action("update").with_id(id)
    }
}
