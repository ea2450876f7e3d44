use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use crate::core::envelope::ApiResponse;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Unrecognized period selector
    #[error("Invalid period: '{0}'. Expected one of today, week, month, year, all")]
    InvalidPeriod(String),

    /// Month label lookup outside 1..=12
    #[error("Invalid month: {0}. Expected a value between 1 and 12")]
    InvalidMonth(u32),

    /// Transaction store unreachable, failed or timed out
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Validation errors for request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource is in a state that forbids the operation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Failure envelope received from the admin API; `message` is shown verbatim
    #[error("{message}")]
    Remote { code: String, message: String },
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpClient(reqwest_middleware::Error::from(err))
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::<()>::failure(self.code(), self.to_string()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
            AppError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Remote { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        AppError::DataUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Machine-readable code carried in the failure envelope
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidPeriod(_) => "INVALID_PERIOD",
            AppError::InvalidMonth(_) => "INVALID_MONTH",
            AppError::DataUnavailable(_) => "DATA_UNAVAILABLE",
            AppError::Validation(_) | AppError::Json(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::HttpClient(_) | AppError::Remote { .. } => "UPSTREAM_ERROR",
            AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Rebuild an error from a failure envelope received by the admin client
    pub fn from_remote(code: Option<&str>, message: String) -> Self {
        AppError::Remote {
            code: code.unwrap_or("INTERNAL_ERROR").to_string(),
            message,
        }
    }

    /// Operational failures the user may retry, as opposed to caller mistakes
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::DataUnavailable(_) | AppError::HttpClient(_) => true,
            AppError::Remote { code, .. } => {
                matches!(code.as_str(), "DATA_UNAVAILABLE" | "UPSTREAM_ERROR" | "INTERNAL_ERROR")
            }
            _ => false,
        }
    }
}
