//! Company entity model.

use itam_core::traits::{Keyed, Labeled};
use itam_core::types::CompanyId;
use serde::{Deserialize, Serialize};

/// Root of the organization hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique company identifier.
    #[serde(alias = "company_id")]
    pub id: CompanyId,
    /// Company name.
    #[serde(alias = "company_name")]
    pub name: String,
}

impl Keyed for Company {
    type Key = CompanyId;

    fn key(&self) -> CompanyId {
        self.id
    }
}

impl Labeled for Company {
    fn label(&self) -> &str {
        &self.name
    }
}
