pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Transaction, TransactionStatus};
pub use repositories::TransactionRepository;
pub use services::TransactionService;
