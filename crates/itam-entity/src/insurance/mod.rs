//! Insurance policies served by `insurance.php`.

pub mod model;

pub use model::InsurancePolicy;
