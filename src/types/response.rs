use serde::{Deserialize, Serialize};

use crate::errors::{AppError, FieldErrors};
use crate::forms::add_money::DraftValues;

#[derive(Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub status: String,
}

/// Result of a form action: exactly one of `success` / `error` is set.
/// Errors carry the caller's draft back so the form can stay populated.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<DraftValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
            fields: None,
            values: None,
            data: Some(data),
        }
    }

    pub fn failure(err: &AppError, values: Option<DraftValues>) -> Self {
        Self {
            success: None,
            error: Some(err.public_message()),
            fields: err.field_errors().cloned(),
            values,
            data: None,
        }
    }
}
