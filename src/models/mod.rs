//! Core data models for fundview
//!
//! Loosely-typed input records (category totals, transactions, budget plan
//! snapshots), the query parameters for tabular views, and the numeric
//! coercion rules every model uses when loading.

pub mod budget;
pub mod category;
pub mod numeric;
pub mod query;
pub mod transaction;

pub use budget::BudgetPlanSnapshot;
pub use category::{CategoryRecord, UNCATEGORIZED};
pub use query::{
    FilterSpec, PageSpec, QuerySpec, Selection, SortDirection, SortKey, SortSpec,
    DEFAULT_PAGE_SIZE,
};
pub use transaction::{TransactionRecord, TransactionStatus, TransactionType};
