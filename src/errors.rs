use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Validation(Vec<String>),
    DuplicateCode,
    DuplicateName,
    InvalidId,
    NotFound,
    Unauthorized,
    Session(String),
    Hash(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            AppError::DuplicateCode => write!(f, "Document code already exists"),
            AppError::DuplicateName => write!(f, "Document type name already exists"),
            AppError::InvalidId => write!(f, "Invalid id"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Unauthorized => write!(f, "Authentication required"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Validation failed",
                "details": errors,
            })),
            // Recoverable uniqueness conflicts carry a machine-readable code
            // so callers can resubmit instead of treating them as fatal.
            AppError::DuplicateCode => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Document code already exists",
                "code": "duplicate_code",
                "message": "Please use a unique document code. The code you entered is already in use.",
            })),
            AppError::DuplicateName => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Document type name already exists",
                "code": "duplicate_name",
            })),
            AppError::InvalidId => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid id",
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "Not found",
            })),
            AppError::Unauthorized => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Authentication required",
            })),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error",
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}
