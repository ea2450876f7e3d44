pub mod transaction;
pub mod transaction_query;

pub use transaction::{Transaction, TransactionStatus};
pub use transaction_query::{
    Pagination, TransactionFilter, TransactionListQuery, TransactionPage, TransactionView,
};
