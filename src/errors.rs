use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name (as sent on the wire) to the messages raised for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Missing or invalid authorization token")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Money request {0} has already been processed")]
    AlreadyProcessed(i32),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid multipart payload: {0}")]
    Multipart(String),

    #[error("Image host error: {0}")]
    ImageHost(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(name.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }

    pub fn image_host(msg: impl Into<String>) -> Self {
        AppError::ImageHost(msg.into())
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(fields) => Some(fields),
            _ => None,
        }
    }

    /// Message safe to show to the caller. Internal failures are reported generically.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::ImageHost(_) => "Failed to upload image".to_string(),
            AppError::Configuration(_) => "Service is misconfigured".to_string(),
            other => other.to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            AppError::Database(_) | AppError::Configuration(_) | AppError::ImageHost(_) => {
                log::error!("{}", self)
            }
            _ => log::debug!("{}", self),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidStatus(_) | AppError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyProcessed(_) | AppError::SubmissionInFlight => StatusCode::CONFLICT,
            AppError::ImageHost(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        let mut body = json!({
            "message": self.public_message(),
            "status": "error",
        });
        if let Some(fields) = self.field_errors() {
            body["errors"] = json!(fields);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            fields.insert(wire_name(&field.to_string()), messages);
        }
        AppError::Validation(fields)
    }
}

/// `transaction_id` -> `transactionId`, matching the multipart field names.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
