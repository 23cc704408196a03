//! Shared response envelope types for API handlers.
//!
//! Reads answer with `{ "data": ... }`; writes answer with
//! `{ "message": ..., "data": ... }` where `data` is omitted when there is
//! nothing to return.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data"?: T }` envelope for state-changing endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize = ()> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl MessageResponse<()> {
    /// A bare message with no payload.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> MessageResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}
