pub mod host_earning;

pub use host_earning::{
    verify_earnings, EarningStatus, Host, HostEarning, HostPayoutOverview, PayoutMethod,
    PayoutReceipt, PayoutSettlement, ProcessPayoutRequest,
};
