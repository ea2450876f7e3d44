mod payout_controller;

pub use payout_controller::configure;
