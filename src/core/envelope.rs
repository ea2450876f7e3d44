use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Uniform response envelope shared by every admin endpoint.
///
/// `success` is the only authoritative failure signal; clients must not
/// infer failure from the transport status code alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: Some(code.to_string()),
        }
    }

    /// Unwrap the envelope into the payload or the error it reports
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "Request failed without a message".to_string());
            return Err(AppError::from_remote(self.code.as_deref(), message));
        }

        self.data
            .ok_or_else(|| AppError::internal("Successful response carried no data"))
    }
}
