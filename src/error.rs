use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    pub fn new(field: &str, error: &str) -> Self {
        Self { field: field.to_string(), error: error.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Validation failed for {} field(s)", .0.len())]
    ValidationErrors(Vec<FieldError>),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(e) if is_unique_violation(e) => StatusCode::CONFLICT,
            AppError::Database(e) if is_foreign_key_violation(e) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::ValidationErrors(_) => StatusCode::BAD_REQUEST,
            AppError::Internal | AppError::InternalWithMsg(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// 2067 = SQLite Unique Constraint
// 23505 = PostgreSQL Unique Violation
fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code == "2067" || code == "23505")
        .unwrap_or(false)
}

// 787 = SQLite Foreign Key Constraint
// 23503 = PostgreSQL Foreign Key Violation
fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code == "787" || code == "23503")
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, detail) = match &self {
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    ("Resource already exists (duplicate entry)".to_string(), None)
                } else if is_foreign_key_violation(e) {
                    ("Referenced resource does not exist".to_string(), None)
                } else {
                    error!("Database error: {:?}", e);
                    ("Internal server error".to_string(), None)
                }
            }
            AppError::NotFound(msg) => (msg.clone(), None),
            AppError::Unauthorized => ("Unauthorized".to_string(), None),
            AppError::Forbidden(msg) => (msg.clone(), None),
            AppError::Conflict(msg) => (msg.clone(), None),
            AppError::Validation(msg) => (msg.clone(), None),
            AppError::ValidationErrors(errors) => (
                "Validation failed".to_string(),
                Some(json!(errors)),
            ),
            AppError::Internal => ("Internal error".to_string(), None),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                ("Internal error".to_string(), None)
            }
        };

        let mut body = json!({
            "statusCode": status.as_u16(),
            "message": message,
        });
        if let Some(detail) = detail {
            body["error"] = detail;
        }

        (status, Json(body)).into_response()
    }
}
