//! Read-only aggregate figures served by `dashboard.php`.

pub mod stats;

pub use stats::{
    ConditionCount, CompanyCount, DashboardAction, DashboardStats, MonthlyCount, OverdueBorrow,
    UrgentRepair,
};
