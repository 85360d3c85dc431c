use serde::Deserialize;

use crate::repository::ApiError;

/// Uniform response wrapper used by every endpoint.
///
/// `{"success": true, "data": ...}` on success,
/// `{"success": false, "error": "..."}` on rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful response.
    pub(crate) fn into_data(self) -> Result<T, ApiError> {
        self.ensure_success()?.data.ok_or(ApiError::MissingData)
    }

    /// Check the success flag, ignoring any payload.
    pub(crate) fn into_ack(self) -> Result<(), ApiError> {
        self.ensure_success().map(|_| ())
    }

    fn ensure_success(self) -> Result<Self, ApiError> {
        if self.success {
            return Ok(self);
        }
        let reason = self
            .error
            .or(self.message)
            .unwrap_or_else(|| "request rejected".to_owned());
        Err(ApiError::Rejected(reason))
    }
}
