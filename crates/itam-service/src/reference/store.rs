//! Reference data store: the lookup lists behind every dropdown.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use itam_core::error::AppError;
use itam_core::request::{Endpoint, RequestBody};
use itam_core::result::AppResult;
use itam_core::traits::{ApiTransport, Service};
use itam_core::types::{CategoryId, CompanyId, DepartmentId, SubcategoryId};
use itam_entity::catalog::{
    AssetType, Category, Condition, MappedType, NewCategory, NewMappedType, NewSubcategory, Status,
    Subcategory, Urgency,
};
use itam_entity::org::{Company, Department, Unit, User};
use itam_entity::validate_form;

use crate::cascade::{catalog, org};
use crate::reply::{fetch_list, submit};

/// Script serving every lookup resource.
const LOOKUP_SCRIPT: &str = "asset";

/// One lookup list served by `asset.php?resource=..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    /// Companies.
    Company,
    /// Departments, each under a company.
    Department,
    /// Units, under a company or one of its departments.
    Unit,
    /// Users with their organization placement.
    User,
    /// Top-level asset categories.
    Category,
    /// Subcategories, each under a category.
    Subcategory,
    /// Asset types.
    AssetType,
    /// Subcategory to type mappings.
    MappedType,
    /// Asset conditions.
    Condition,
    /// Asset statuses.
    Status,
    /// Repair urgency levels.
    Urgency,
}

impl Lookup {
    /// Every lookup, in load order.
    pub const ALL: [Lookup; 11] = [
        Self::Company,
        Self::Department,
        Self::Unit,
        Self::User,
        Self::Category,
        Self::Subcategory,
        Self::AssetType,
        Self::MappedType,
        Self::Condition,
        Self::Status,
        Self::Urgency,
    ];

    /// The `resource=` value.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Department => "department",
            Self::Unit => "unit",
            Self::User => "user",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::AssetType => "type",
            Self::MappedType => "mappedtype",
            Self::Condition => "condition",
            Self::Status => "status",
            Self::Urgency => "repairUrgency",
        }
    }

    /// The list/insert endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::resource(LOOKUP_SCRIPT, self.resource())
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.resource())
    }
}

/// A snapshot of every lookup list. Lists still loading are empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceData {
    /// Companies.
    pub companies: Vec<Company>,
    /// Departments.
    pub departments: Vec<Department>,
    /// Units.
    pub units: Vec<Unit>,
    /// Users.
    pub users: Vec<User>,
    /// Categories.
    pub categories: Vec<Category>,
    /// Subcategories.
    pub subcategories: Vec<Subcategory>,
    /// Asset types.
    pub asset_types: Vec<AssetType>,
    /// Subcategory to type mappings.
    pub mapped_types: Vec<MappedType>,
    /// Asset conditions.
    pub conditions: Vec<Condition>,
    /// Asset statuses.
    pub statuses: Vec<Status>,
    /// Repair urgency levels.
    pub urgencies: Vec<Urgency>,
}

impl ReferenceData {
    /// Department options for a company.
    pub fn department_options(&self, company: Option<CompanyId>) -> Vec<&Department> {
        org::department_options(&self.departments, company)
    }

    /// Unit options for a company and department.
    pub fn unit_options(
        &self,
        company: Option<CompanyId>,
        department: Option<DepartmentId>,
    ) -> Vec<&Unit> {
        org::unit_options(&self.units, company, department)
    }

    /// Subcategory options for a category.
    pub fn subcategory_options(&self, category: Option<CategoryId>) -> Vec<&Subcategory> {
        catalog::subcategory_options(&self.subcategories, category)
    }

    /// Type options for a subcategory.
    pub fn type_options(&self, subcategory: Option<SubcategoryId>) -> Vec<&AssetType> {
        catalog::type_options(&self.asset_types, &self.mapped_types, subcategory)
    }

    /// Row count per lookup.
    pub fn counts(&self) -> Vec<(Lookup, usize)> {
        Lookup::ALL
            .iter()
            .map(|lookup| {
                let n = match lookup {
                    Lookup::Company => self.companies.len(),
                    Lookup::Department => self.departments.len(),
                    Lookup::Unit => self.units.len(),
                    Lookup::User => self.users.len(),
                    Lookup::Category => self.categories.len(),
                    Lookup::Subcategory => self.subcategories.len(),
                    Lookup::AssetType => self.asset_types.len(),
                    Lookup::MappedType => self.mapped_types.len(),
                    Lookup::Condition => self.conditions.len(),
                    Lookup::Status => self.statuses.len(),
                    Lookup::Urgency => self.urgencies.len(),
                };
                (*lookup, n)
            })
            .collect()
    }
}

/// Outcome of a [`ReferenceDataStore::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Lookups that were refreshed.
    pub loaded: Vec<Lookup>,
    /// Lookups that kept their previous contents.
    pub failed: Vec<Lookup>,
}

impl LoadReport {
    /// Whether every lookup loaded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Holds the lookup lists and reloads them after reference mutations.
#[derive(Debug, Clone)]
pub struct ReferenceDataStore {
    /// API transport.
    transport: Arc<dyn ApiTransport>,
    /// Current lists.
    data: Arc<RwLock<ReferenceData>>,
    /// Aborts in-flight loads and blocks later writes.
    cancel: CancellationToken,
}

impl ReferenceDataStore {
    /// Creates a new reference data store.
    pub fn new(transport: Arc<dyn ApiTransport>, cancel: CancellationToken) -> Self {
        Self {
            transport,
            data: Arc::new(RwLock::new(ReferenceData::default())),
            cancel,
        }
    }

    /// Read access to the current lists.
    pub async fn read(&self) -> RwLockReadGuard<'_, ReferenceData> {
        self.data.read().await
    }

    /// A copy of the current lists.
    pub async fn snapshot(&self) -> ReferenceData {
        self.data.read().await.clone()
    }

    /// The store's cancellation token.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetch every lookup concurrently. Each list is written as soon as it
    /// arrives; a failed fetch keeps that list's previous contents.
    ///
    /// Only cancellation is an error.
    #[instrument(skip(self), fields(transport = self.transport.transport_name()))]
    pub async fn load(&self) -> AppResult<LoadReport> {
        let results = tokio::join!(
            self.load_one::<Company, _>(Lookup::Company, |d, v| d.companies = v),
            self.load_one::<Department, _>(Lookup::Department, |d, v| d.departments = v),
            self.load_one::<Unit, _>(Lookup::Unit, |d, v| d.units = v),
            self.load_one::<User, _>(Lookup::User, |d, v| d.users = v),
            self.load_one::<Category, _>(Lookup::Category, |d, v| d.categories = v),
            self.load_one::<Subcategory, _>(Lookup::Subcategory, |d, v| d.subcategories = v),
            self.load_one::<AssetType, _>(Lookup::AssetType, |d, v| d.asset_types = v),
            self.load_one::<MappedType, _>(Lookup::MappedType, |d, v| d.mapped_types = v),
            self.load_one::<Condition, _>(Lookup::Condition, |d, v| d.conditions = v),
            self.load_one::<Status, _>(Lookup::Status, |d, v| d.statuses = v),
            self.load_one::<Urgency, _>(Lookup::Urgency, |d, v| d.urgencies = v),
        );
        let outcomes = [
            results.0, results.1, results.2, results.3, results.4, results.5, results.6,
            results.7, results.8, results.9, results.10,
        ];

        if self.cancel.is_cancelled() {
            return Err(AppError::cancelled("Reference data load was cancelled"));
        }

        let mut report = LoadReport::default();
        for (lookup, ok) in Lookup::ALL.into_iter().zip(outcomes) {
            if ok {
                report.loaded.push(lookup);
            } else {
                report.failed.push(lookup);
            }
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Reference data loaded"
        );
        Ok(report)
    }

    async fn load_one<T, F>(&self, lookup: Lookup, apply: F) -> bool
    where
        T: DeserializeOwned,
        F: FnOnce(&mut ReferenceData, Vec<T>),
    {
        match fetch_list::<T>(self.transport.as_ref(), &lookup.endpoint(), &self.cancel).await {
            Ok(rows) => {
                let mut data = self.data.write().await;
                if self.cancel.is_cancelled() {
                    return false;
                }
                apply(&mut *data, rows);
                true
            }
            Err(e) if e.is_cancelled() => false,
            Err(e) => {
                warn!(lookup = %lookup, error = %e, "Failed to load reference list");
                false
            }
        }
    }

    /// Add a category, then reload everything.
    pub async fn insert_category(&self, form: &NewCategory) -> AppResult<Value> {
        self.insert(Lookup::Category, form).await
    }

    /// Add a subcategory, then reload everything.
    pub async fn insert_subcategory(&self, form: &NewSubcategory) -> AppResult<Value> {
        self.insert(Lookup::Subcategory, form).await
    }

    /// Map a type under a subcategory, then reload everything.
    pub async fn insert_mapped_type(&self, form: &NewMappedType) -> AppResult<Value> {
        self.insert(Lookup::MappedType, form).await
    }

    async fn insert<F>(&self, lookup: Lookup, form: &F) -> AppResult<Value>
    where
        F: Serialize + validator::Validate,
    {
        validate_form(form)?;
        let body = RequestBody::for_record(form, Vec::new())?;
        let reply = submit(self.transport.as_ref(), &lookup.endpoint(), body, &self.cancel).await?;
        info!(lookup = %lookup, "Reference record inserted");

        let report = self.load().await?;
        if !report.is_complete() {
            warn!(failed = ?report.failed, "Reload after insert was partial");
        }
        Ok(reply)
    }
}

impl Service for ReferenceDataStore {}
