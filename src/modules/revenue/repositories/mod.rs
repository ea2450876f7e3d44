pub mod revenue_repository;

pub use revenue_repository::TransactionStore;
