//! Transaction stores: borrows, repair tickets, and issuances.

pub mod store;

use itam_entity::transaction::{BorrowRecord, IssuanceRecord, RepairRequest};

pub use store::TransactionStore;

/// Store for borrow transactions.
pub type BorrowStore = TransactionStore<BorrowRecord>;

/// Store for repair tickets.
pub type RepairStore = TransactionStore<RepairRequest>;

/// Store for issuance records.
pub type IssuanceStore = TransactionStore<IssuanceRecord>;
