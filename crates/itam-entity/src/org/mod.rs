//! Organization hierarchy: company → department → unit → employee.

pub mod company;
pub mod department;
pub mod unit;
pub mod user;

pub use company::Company;
pub use department::Department;
pub use unit::Unit;
pub use user::User;
