pub mod dashboard;
pub mod health;
pub mod payouts;
pub mod revenue;
pub mod transactions;
