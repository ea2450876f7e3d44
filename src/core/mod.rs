pub mod envelope;
pub mod error;
pub mod format;
pub mod labels;
pub mod timezone;

pub use envelope::ApiResponse;
pub use error::{AppError, Result};
pub use labels::PaymentMethod;
